use serde::{Deserialize, Serialize};

use super::group::PatternGroup;
use crate::clients::ravelry::{ApiPack, ApiProjectDetail};

/// Yarn usage pulled from a project's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectYarnRecord {
    pub pattern_id: Option<i64>,
    pub project_id: i64,
    pub project_favorites: i64,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub completed: Option<String>,
    pub yarn_data: Vec<YarnUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YarnUsage {
    pub package_id: i64,
    pub yarn_id: Option<i64>,
    pub yarn_name: Option<String>,
    pub yarn_permalink: Option<String>,
}

impl YarnUsage {
    fn from_pack(package_id: i64, pack: ApiPack) -> Self {
        Self {
            package_id,
            yarn_id: pack.yarn_id,
            yarn_name: pack.yarn_name,
            yarn_permalink: pack.yarn.and_then(|y| y.permalink),
        }
    }
}

impl From<ApiProjectDetail> for ProjectYarnRecord {
    fn from(p: ApiProjectDetail) -> Self {
        // Packs after the first placeholder (null id) are not read.
        let yarn_data = p
            .packs
            .into_iter()
            .map_while(|pack| {
                let id = pack.id?;
                Some(YarnUsage::from_pack(id, pack))
            })
            .collect();

        Self {
            pattern_id: p.pattern_id,
            project_id: p.id,
            project_favorites: p.favorites_count,
            started: p.started,
            completed: p.completed,
            yarn_data,
        }
    }
}

pub type PatternYarnGroup = PatternGroup<ProjectYarnRecord>;

/// A distinct yarn seen across the stored project details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YarnCatalogEntry {
    pub matrix_index: usize,
    pub yarn_id: i64,
    pub yarn_name: String,
    pub yarn_permalink: Option<String>,
}
