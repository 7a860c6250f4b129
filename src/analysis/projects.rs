use std::collections::BTreeMap;

use super::rank;
use crate::models::ResultSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternPopularity {
    pub permalink: String,
    pub project_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectReport {
    pub total_projects: usize,
    /// Sorted by status name.
    pub status_distribution: Vec<(String, usize)>,
    pub active_users: Vec<(String, usize)>,
    pub common_tags: Vec<(String, usize)>,
    pub pattern_popularity: Vec<PatternPopularity>,
}

/// Aggregates over the project search results of a run.
#[must_use]
pub fn analyze_projects(result_set: &ResultSet, top_users: usize, top_tags: usize) -> ProjectReport {
    let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
    let mut users: BTreeMap<String, usize> = BTreeMap::new();
    let mut tags: BTreeMap<String, usize> = BTreeMap::new();

    for project in result_set.iter_projects() {
        *statuses.entry(project.status.clone()).or_default() += 1;
        *users.entry(project.username.clone()).or_default() += 1;
        for tag in &project.tag_names {
            *tags.entry(tag.clone()).or_default() += 1;
        }
    }

    let mut pattern_popularity: Vec<PatternPopularity> = result_set
        .projects
        .iter()
        .map(|g| PatternPopularity {
            permalink: g.permalink.clone(),
            project_count: g.len(),
        })
        .collect();
    // Stable: equal counts keep pattern order.
    pattern_popularity.sort_by(|a, b| b.project_count.cmp(&a.project_count));

    ProjectReport {
        total_projects: result_set.project_count(),
        status_distribution: statuses.into_iter().collect(),
        active_users: rank(users, top_users),
        common_tags: rank(tags, top_tags),
        pattern_popularity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatternGroup, ProjectRecord};

    fn project(id: i64, user: &str, status: &str, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id,
            name: format!("p{id}"),
            permalink: format!("p{id}"),
            pattern_id: 1,
            user_id: id,
            username: user.to_string(),
            status: status.to_string(),
            tag_names: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn sample() -> ResultSet {
        ResultSet {
            projects: vec![
                PatternGroup::new(
                    "cardi",
                    vec![
                        project(1, "alice", "finished", &["wool", "gift"]),
                        project(2, "bob", "finished", &["wool"]),
                    ],
                ),
                PatternGroup::new("empty", vec![]),
                PatternGroup::new(
                    "raglan",
                    vec![
                        project(3, "alice", "frogged", &["wool", "cotton"]),
                        project(4, "carol", "finished", &[]),
                        project(5, "alice", "finished", &["gift"]),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_counts() {
        let report = analyze_projects(&sample(), 10, 10);

        assert_eq!(report.total_projects, 5);
        assert_eq!(
            report.status_distribution,
            vec![("finished".to_string(), 4), ("frogged".to_string(), 1)]
        );
        assert_eq!(
            report.active_users,
            vec![
                ("alice".to_string(), 3),
                ("bob".to_string(), 1),
                ("carol".to_string(), 1)
            ]
        );
        assert_eq!(
            report.common_tags,
            vec![
                ("wool".to_string(), 3),
                ("gift".to_string(), 2),
                ("cotton".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_pattern_popularity_keeps_empty_groups() {
        let report = analyze_projects(&sample(), 1, 1);

        let order: Vec<(&str, usize)> = report
            .pattern_popularity
            .iter()
            .map(|p| (p.permalink.as_str(), p.project_count))
            .collect();
        assert_eq!(order, vec![("raglan", 3), ("cardi", 2), ("empty", 0)]);
        assert_eq!(report.active_users.len(), 1);
        assert_eq!(report.common_tags.len(), 1);
    }

    #[test]
    fn test_empty_result_set() {
        let report = analyze_projects(&ResultSet::default(), 10, 10);
        assert_eq!(report, ProjectReport::default());
    }
}
