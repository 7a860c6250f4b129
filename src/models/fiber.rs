use serde::{Deserialize, Serialize};

use crate::clients::ravelry::{ApiFiberContent, ApiYarn};

/// Fiber makeup of one catalog yarn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YarnFiberRecord {
    pub yarn_id: i64,
    pub yarn_name: String,
    pub fiber_content: Vec<FiberContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberContent {
    pub fiber_type: String,
    pub percentage: Option<f64>,
}

impl From<ApiFiberContent> for FiberContent {
    fn from(f: ApiFiberContent) -> Self {
        Self {
            fiber_type: f.fiber_type,
            percentage: f.percentage,
        }
    }
}

impl From<ApiYarn> for YarnFiberRecord {
    fn from(y: ApiYarn) -> Self {
        Self {
            yarn_id: y.id,
            yarn_name: y.name,
            fiber_content: y.fiber_content.into_iter().map(FiberContent::from).collect(),
        }
    }
}
