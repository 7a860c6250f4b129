use anyhow::Context;

use crate::analysis::export::{
    export_completion, export_fiber_report, export_project_report, export_yarn_report,
};
use crate::analysis::{
    FiberAnalysis, YarnCoUsage, analyze_projects, build_catalog, completion_days, completion_stats,
    monthly_starts,
};
use crate::config::Config;
use crate::constants::limits;
use crate::models::{ResultSet, YarnFiberRecord};
use crate::services::persistence::{read_json, write_json};
use crate::services::yarn_detail::load_groups;

pub fn cmd_analyze(config: &Config, top: usize) -> anyhow::Result<()> {
    let result_set: ResultSet = read_json(&config.projects_path())
        .context("No stored projects; run `find-projects` first")?;
    let out_dir = config.analysis_dir();

    let report = analyze_projects(&result_set, top, top.max(limits::DEFAULT_TAG_TOP_N));
    let mut written = export_project_report(&out_dir, &report)?;

    println!("Projects");
    println!("{:-<60}", "");
    println!("Total:    {}", report.total_projects);
    for (status, count) in &report.status_distribution {
        println!("  {status:<20} {count}");
    }
    if let Some(p) = report.pattern_popularity.first() {
        println!("Most made: {} ({} projects)", p.permalink, p.project_count);
    }

    let groups = load_groups(&result_set, &config.yarn_detail_dir())?;
    if groups.is_empty() {
        println!();
        println!("No yarn data yet; run `pull-yarns` for completion and yarn statistics.");
    } else {
        let records: Vec<_> = groups.iter().flat_map(|g| g.entries.iter()).collect();

        let days = completion_days(records.iter().copied());
        let stats = completion_stats(&days);
        let monthly = monthly_starts(records.iter().copied(), limits::DEFAULT_TREND_MONTHS);
        written.extend(export_completion(&out_dir, stats.as_ref(), &monthly)?);

        let catalog = build_catalog(&groups);
        write_json(&config.yarn_catalog_path(), &catalog)?;
        written.push(config.yarn_catalog_path());

        let co_usage = YarnCoUsage::from_groups(&groups);
        written.extend(export_yarn_report(&out_dir, &catalog, &co_usage, top)?);

        let fibers_path = config.yarn_fibers_path();
        let fiber_records: Vec<YarnFiberRecord> = if fibers_path.exists() {
            read_json(&fibers_path)?
        } else {
            Vec::new()
        };
        let fibers = FiberAnalysis::from_records(&groups, &fiber_records);
        written.extend(export_fiber_report(&out_dir, &fibers, top)?);

        println!();
        println!("Yarns");
        println!("{:-<60}", "");
        println!("Patterns with yarn data: {}", groups.len());
        println!("Distinct yarns:          {}", catalog.len());
        if let Some((fiber, count)) = fibers.top_fibers(1).first() {
            println!("Most used fiber:         {fiber} ({count} yarn uses)");
        }
        match &stats {
            Some(s) => println!(
                "Completion:              {:.1} days mean, {:.1} median ({} projects)",
                s.mean_days, s.median_days, s.count
            ),
            None => println!("Completion:              no dated projects"),
        }
    }

    println!();
    for path in &written {
        println!("✓ {}", path.display());
    }

    Ok(())
}
