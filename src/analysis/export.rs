//! CSV export of analysis results.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::completion::CompletionStats;
use super::fibers::FiberAnalysis;
use super::projects::ProjectReport;
use super::yarns::YarnCoUsage;
use crate::error::HarvestError;
use crate::models::YarnCatalogEntry;
use crate::services::persistence::write_csv;

fn counts_rows(counts: &[(String, usize)]) -> Vec<Vec<String>> {
    counts
        .iter()
        .map(|(k, n)| vec![k.clone(), n.to_string()])
        .collect()
}

/// Writes the project report; returns the files written.
pub fn export_project_report(
    dir: &Path,
    report: &ProjectReport,
) -> Result<Vec<PathBuf>, HarvestError> {
    let status = dir.join("status_distribution.csv");
    write_csv(
        &status,
        &["Status", "Projects"],
        &counts_rows(&report.status_distribution),
    )?;

    let users = dir.join("active_users.csv");
    write_csv(&users, &["Username", "Projects"], &counts_rows(&report.active_users))?;

    let tags = dir.join("common_tags.csv");
    write_csv(&tags, &["Tag", "Count"], &counts_rows(&report.common_tags))?;

    let popularity = dir.join("pattern_popularity.csv");
    let rows: Vec<Vec<String>> = report
        .pattern_popularity
        .iter()
        .map(|p| vec![p.permalink.clone(), p.project_count.to_string()])
        .collect();
    write_csv(&popularity, &["Pattern", "Projects"], &rows)?;

    Ok(vec![status, users, tags, popularity])
}

pub fn export_completion(
    dir: &Path,
    stats: Option<&CompletionStats>,
    monthly: &[(String, usize)],
) -> Result<Vec<PathBuf>, HarvestError> {
    let stats_path = dir.join("completion_stats.csv");
    let rows = stats
        .map(|s| {
            vec![vec![
                s.count.to_string(),
                format!("{:.2}", s.mean_days),
                format!("{:.1}", s.median_days),
                s.min_days.to_string(),
                s.max_days.to_string(),
            ]]
        })
        .unwrap_or_default();
    write_csv(
        &stats_path,
        &["Projects", "MeanDays", "MedianDays", "MinDays", "MaxDays"],
        &rows,
    )?;

    let trend_path = dir.join("monthly_trends.csv");
    write_csv(&trend_path, &["Month", "Started"], &counts_rows(monthly))?;

    Ok(vec![stats_path, trend_path])
}

pub fn export_yarn_report(
    dir: &Path,
    catalog: &[YarnCatalogEntry],
    co_usage: &YarnCoUsage,
    top_n: usize,
) -> Result<Vec<PathBuf>, HarvestError> {
    let names: HashMap<i64, &str> = catalog
        .iter()
        .map(|e| (e.yarn_id, e.yarn_name.as_str()))
        .collect();
    let name = |id: i64| names.get(&id).copied().unwrap_or_default().to_string();

    let usage_path = dir.join("yarn_usage.csv");
    let rows: Vec<Vec<String>> = co_usage
        .top_yarns(top_n)
        .into_iter()
        .map(|(id, n)| vec![id.to_string(), name(id), n.to_string()])
        .collect();
    write_csv(&usage_path, &["YarnId", "Yarn", "Projects"], &rows)?;

    let pairs_path = dir.join("yarn_pairs.csv");
    let rows: Vec<Vec<String>> = co_usage
        .top_pairs(top_n)
        .into_iter()
        .map(|p| {
            vec![
                name(p.first),
                name(p.second),
                p.patterns.to_string(),
            ]
        })
        .collect();
    write_csv(&pairs_path, &["Yarn", "UsedWith", "Patterns"], &rows)?;

    Ok(vec![usage_path, pairs_path])
}

pub fn export_fiber_report(
    dir: &Path,
    fibers: &FiberAnalysis,
    top_n: usize,
) -> Result<Vec<PathBuf>, HarvestError> {
    let counts_path = dir.join("fibers.csv");
    write_csv(&counts_path, &["Fiber", "Count"], &counts_rows(&fibers.top_fibers(top_n)))?;

    let combos_path = dir.join("fiber_combinations.csv");
    let rows: Vec<Vec<String>> = fibers
        .top_combinations(top_n)
        .into_iter()
        .map(|(combo, n)| vec![combo.join(" + "), n.to_string()])
        .collect();
    write_csv(&combos_path, &["Combination", "Count"], &rows)?;

    let by_pattern_path = dir.join("fiber_by_pattern.csv");
    let rows: Vec<Vec<String>> = fibers
        .pattern_rows()
        .into_iter()
        .map(|(pattern_id, fiber, n)| vec![pattern_id.to_string(), fiber.to_string(), n.to_string()])
        .collect();
    write_csv(&by_pattern_path, &["PatternId", "Fiber", "Count"], &rows)?;

    let correlations_path = dir.join("fiber_correlations.csv");
    let rows: Vec<Vec<String>> = fibers
        .correlations()
        .into_iter()
        .map(|c| vec![c.first, c.second, format!("{:.4}", c.coefficient)])
        .collect();
    write_csv(&correlations_path, &["Fiber", "Fiber", "Correlation"], &rows)?;

    Ok(vec![counts_path, combos_path, by_pattern_path, correlations_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PatternPopularity;

    #[test]
    fn test_project_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = ProjectReport {
            total_projects: 3,
            status_distribution: vec![("finished".to_string(), 3)],
            active_users: vec![("alice".to_string(), 2), ("bob".to_string(), 1)],
            common_tags: vec![],
            pattern_popularity: vec![PatternPopularity {
                permalink: "cardi".to_string(),
                project_count: 3,
            }],
        };

        let written = export_project_report(dir.path(), &report).unwrap();
        assert_eq!(written.len(), 4);

        let users = std::fs::read_to_string(dir.path().join("active_users.csv")).unwrap();
        assert_eq!(users, "Username,Projects\nalice,2\nbob,1\n");
        let tags = std::fs::read_to_string(dir.path().join("common_tags.csv")).unwrap();
        assert_eq!(tags, "Tag,Count\n");
    }

    #[test]
    fn test_completion_without_data_writes_headers_only() {
        let dir = tempfile::tempdir().unwrap();
        export_completion(dir.path(), None, &[]).unwrap();

        let stats = std::fs::read_to_string(dir.path().join("completion_stats.csv")).unwrap();
        assert_eq!(stats, "Projects,MeanDays,MedianDays,MinDays,MaxDays\n");
    }

    #[test]
    fn test_fiber_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut fibers = FiberAnalysis::default();
        fibers.fiber_counts.insert("Wool".to_string(), 3);
        fibers.fiber_counts.insert("Silk".to_string(), 1);
        fibers
            .combinations
            .insert(vec!["Silk".to_string(), "Wool".to_string()], 1);
        fibers
            .by_pattern
            .insert(7, [("Wool".to_string(), 3)].into_iter().collect());

        let written = export_fiber_report(dir.path(), &fibers, 10).unwrap();
        assert_eq!(written.len(), 4);

        let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("fibers.csv"), "Fiber,Count\nWool,3\nSilk,1\n");
        assert_eq!(read("fiber_combinations.csv"), "Combination,Count\nSilk + Wool,1\n");
        assert_eq!(read("fiber_by_pattern.csv"), "PatternId,Fiber,Count\n7,Wool,3\n");
        assert_eq!(read("fiber_correlations.csv"), "Fiber,Fiber,Correlation\n");
    }

    #[test]
    fn test_yarn_pairs_use_catalog_names() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = vec![
            YarnCatalogEntry {
                matrix_index: 0,
                yarn_id: 10,
                yarn_name: "Worsted".to_string(),
                yarn_permalink: None,
            },
            YarnCatalogEntry {
                matrix_index: 1,
                yarn_id: 30,
                yarn_name: "Aran, Tweed".to_string(),
                yarn_permalink: None,
            },
        ];
        let mut co = YarnCoUsage::default();
        co.pairs.insert((10, 30), 2);
        co.usage.insert(10, 4);

        export_yarn_report(dir.path(), &catalog, &co, 5).unwrap();

        let pairs = std::fs::read_to_string(dir.path().join("yarn_pairs.csv")).unwrap();
        assert_eq!(pairs, "Yarn,UsedWith,Patterns\nWorsted,\"Aran, Tweed\",2\n");
        let usage = std::fs::read_to_string(dir.path().join("yarn_usage.csv")).unwrap();
        assert_eq!(usage, "YarnId,Yarn,Projects\n10,Worsted,4\n");
    }
}
