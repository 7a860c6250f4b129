use std::path::PathBuf;

use super::connect;
use crate::config::Config;
use crate::services::HarvestService;
use crate::services::persistence::write_json;

pub async fn cmd_find_projects(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let (client, urls) = connect(config).await?;
    let service = HarvestService::new(client, urls, config.search.clone());

    let outcome = service.run().await?;

    let output = output.unwrap_or_else(|| config.projects_path());
    write_json(&output, &outcome.result_set)?;
    write_json(&config.pattern_index_path(), &outcome.patterns)?;

    let stats = service.client().stats();
    let cached = service.client().store().cached_response_count().await?;
    println!(
        "✓ {} patterns, {} projects written to {}",
        outcome.patterns.patterns.len(),
        outcome.result_set.project_count(),
        output.display()
    );
    println!(
        "  {} requests ({} from cache), {} responses cached in total",
        stats.hits + stats.misses,
        stats.hits,
        cached
    );

    Ok(())
}
