use serde::{Deserialize, Serialize};

use super::group::PatternGroup;
use crate::clients::ravelry::ApiProject;

/// Normalized project search result.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    pub permalink: String,
    pub pattern_id: i64,
    pub user_id: i64,
    pub username: String,
    pub status: String,
    pub tag_names: Vec<String>,
}

impl From<ApiProject> for ProjectRecord {
    fn from(p: ApiProject) -> Self {
        Self {
            id: p.id,
            name: p.name,
            permalink: p.permalink,
            pattern_id: p.pattern_id,
            user_id: p.user_id,
            username: p.user.username,
            status: p.status_name,
            tag_names: p.tag_names,
        }
    }
}

pub type PatternProjectGroup = PatternGroup<ProjectRecord>;

/// One group per queried pattern, in pattern order, stored under `"projects"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub projects: Vec<PatternProjectGroup>,
}

impl ResultSet {
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.iter().map(PatternGroup::len).sum()
    }

    pub fn iter_projects(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter().flat_map(|g| g.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> ProjectRecord {
        ProjectRecord {
            id,
            name: format!("Project {id}"),
            permalink: format!("project-{id}"),
            pattern_id: 1,
            user_id: 5,
            username: "alice".to_string(),
            status: "finished".to_string(),
            tag_names: vec!["wool".to_string()],
        }
    }

    #[test]
    fn test_result_set_round_trip_keeps_large_ids() {
        let mut big = record(9_007_199_254_740_993);
        big.user_id = i64::MAX;

        let set = ResultSet {
            projects: vec![
                PatternGroup::new("cardi", vec![record(1), big]),
                PatternGroup::new("empty", vec![]),
            ],
        };

        let json = serde_json::to_string(&set).unwrap();
        let back: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert_eq!(back.projects[0].entries[1].id, 9_007_199_254_740_993);
        assert_eq!(back.project_count(), 2);
    }

    #[test]
    fn test_record_key_order() {
        let json = serde_json::to_string(&record(1)).unwrap();
        assert!(json.starts_with(r#"{"id":1,"name":"Project 1","permalink":"project-1","pattern_id":1"#));
        assert!(json.ends_with(r#""status":"finished","tag_names":["wool"]}"#));
    }
}
