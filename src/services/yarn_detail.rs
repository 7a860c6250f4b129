//! Pulls per-project yarn usage for every project of a stored result set,
//! then the fiber content of every yarn seen.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::cached_fetch::{CachedClient, ResponseStore};
use super::endpoints::ApiUrls;
use super::persistence;
use crate::clients::ravelry::{ProjectDetailResponse, Transport, YarnDetailResponse};
use crate::config::SearchConfig;
use crate::db::Store;
use crate::error::HarvestError;
use crate::models::{
    PatternYarnGroup, ProjectRecord, ProjectYarnRecord, ResultSet, YarnCatalogEntry,
    YarnFiberRecord,
};

pub struct YarnDetailService<T, S = Store> {
    client: CachedClient<T, S>,
    urls: ApiUrls,
    search: SearchConfig,
}

impl<T: Transport, S: ResponseStore> YarnDetailService<T, S> {
    pub const fn new(client: CachedClient<T, S>, urls: ApiUrls, search: SearchConfig) -> Self {
        Self {
            client,
            urls,
            search,
        }
    }

    pub async fn fetch_project(
        &self,
        project: &ProjectRecord,
    ) -> Result<(ProjectYarnRecord, bool), HarvestError> {
        let url = self.urls.project_detail(&project.username, project.id)?;
        let fetched = self.client.fetch(&url).await?;
        fetched.require_success()?;

        let detail: ProjectDetailResponse = fetched.decode()?;
        Ok((ProjectYarnRecord::from(detail.project), fetched.from_cache))
    }

    /// Fetches every project's detail and writes one file per pattern group
    /// into `out_dir` as soon as the group is complete.
    pub async fn pull(
        &self,
        result_set: &ResultSet,
        out_dir: &Path,
    ) -> Result<Vec<PatternYarnGroup>, HarvestError> {
        let mut pulled = Vec::with_capacity(result_set.projects.len());

        for (idx, group) in result_set.projects.iter().enumerate() {
            if idx > 0 {
                self.pause(self.search.pattern_group_delay()).await;
            }

            let mut records = Vec::with_capacity(group.len());
            for (n, project) in group.entries.iter().enumerate() {
                let (record, from_cache) = self.fetch_project(project).await?;
                records.push(record);

                if n + 1 < group.len() && !(from_cache && self.search.skip_delay_on_cache_hit) {
                    self.pause(self.search.detail_delay()).await;
                }
            }

            let yarn_group = PatternYarnGroup::new(group.permalink.clone(), records);
            persistence::write_json(&group_path(out_dir, &group.permalink), &yarn_group)?;
            info!(
                "[{}/{}] {}: yarn data for {} projects",
                idx + 1,
                result_set.projects.len(),
                group.permalink,
                yarn_group.len()
            );

            pulled.push(yarn_group);
        }

        Ok(pulled)
    }

    pub async fn fetch_yarn(&self, yarn_id: i64) -> Result<(YarnFiberRecord, bool), HarvestError> {
        let url = self.urls.yarn_detail(yarn_id)?;
        let fetched = self.client.fetch(&url).await?;
        fetched.require_success()?;

        let detail: YarnDetailResponse = fetched.decode()?;
        Ok((YarnFiberRecord::from(detail.yarn), fetched.from_cache))
    }

    /// Fetches the fiber content of every catalog yarn, in catalog order.
    pub async fn pull_fibers(
        &self,
        catalog: &[YarnCatalogEntry],
    ) -> Result<Vec<YarnFiberRecord>, HarvestError> {
        let mut records = Vec::with_capacity(catalog.len());

        for (n, entry) in catalog.iter().enumerate() {
            let (record, from_cache) = self.fetch_yarn(entry.yarn_id).await?;
            debug!(
                "[{}/{}] {}: {} fibers",
                n + 1,
                catalog.len(),
                record.yarn_name,
                record.fiber_content.len()
            );
            records.push(record);

            if n + 1 < catalog.len() && !(from_cache && self.search.skip_delay_on_cache_hit) {
                self.pause(self.search.detail_delay()).await;
            }
        }

        info!("Fiber content for {} yarns", records.len());
        Ok(records)
    }

    async fn pause(&self, delay: std::time::Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// File holding one pattern group's yarn records.
#[must_use]
pub fn group_path(dir: &Path, permalink: &str) -> PathBuf {
    let stem: String = permalink
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    dir.join(format!("{stem}.json"))
}

/// Loads the stored yarn groups for `result_set`, in its order, skipping
/// patterns that have not been pulled yet.
pub fn load_groups(
    result_set: &ResultSet,
    dir: &Path,
) -> Result<Vec<PatternYarnGroup>, HarvestError> {
    let mut groups = Vec::new();
    for group in &result_set.projects {
        let path = group_path(dir, &group.permalink);
        if path.exists() {
            groups.push(persistence::read_json(&path)?);
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_path_sanitizes_separators() {
        let dir = Path::new("data/patterns");
        assert_eq!(
            group_path(dir, "cardi"),
            PathBuf::from("data/patterns/cardi.json")
        );
        assert_eq!(
            group_path(dir, "../etc/passwd"),
            PathBuf::from("data/patterns/.._etc_passwd.json")
        );
    }
}
