use anyhow::Context;

use super::connect;
use crate::analysis::build_catalog;
use crate::config::Config;
use crate::models::ResultSet;
use crate::services::YarnDetailService;
use crate::services::persistence::{read_json, write_json};

pub async fn cmd_pull_yarns(config: &Config) -> anyhow::Result<()> {
    let projects_path = config.projects_path();
    let result_set: ResultSet = read_json(&projects_path)
        .context("No stored projects; run `find-projects` first")?;

    if result_set.project_count() == 0 {
        println!("No projects in {}; nothing to pull.", projects_path.display());
        return Ok(());
    }

    let (client, urls) = connect(config).await?;
    let service = YarnDetailService::new(client, urls, config.search.clone());

    let out_dir = config.yarn_detail_dir();
    let groups = service.pull(&result_set, &out_dir).await?;

    let records: usize = groups.iter().map(|g| g.len()).sum();
    println!(
        "✓ Yarn data for {} projects in {} patterns written to {}",
        records,
        groups.len(),
        out_dir.display()
    );

    let catalog = build_catalog(&groups);
    let fibers = service.pull_fibers(&catalog).await?;
    let fibers_path = config.yarn_fibers_path();
    write_json(&fibers_path, &fibers)?;
    println!(
        "✓ Fiber content for {} yarns written to {}",
        fibers.len(),
        fibers_path.display()
    );

    Ok(())
}
