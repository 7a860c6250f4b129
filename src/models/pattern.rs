use serde::{Deserialize, Serialize};

use crate::clients::ravelry::ApiPattern;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: i64,
    pub name: String,
    pub permalink: String,
}

impl From<ApiPattern> for PatternRecord {
    fn from(p: ApiPattern) -> Self {
        Self {
            id: p.id,
            name: p.name,
            permalink: p.permalink,
        }
    }
}

/// The pattern page of a run, in API order, stored under `"patterns"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    pub patterns: Vec<PatternRecord>,
}
