//! The fetch-cache-normalize pipeline.
//!
//! A run moves through three stages in order: fetch the patterns page, fetch
//! the projects page of every pattern, done. Any error aborts the run and no
//! partial result is returned.

use tracing::{debug, info};

use super::cached_fetch::{CachedClient, ResponseStore};
use super::endpoints::ApiUrls;
use crate::clients::ravelry::{PatternSearchResponse, ProjectSearchResponse, Transport};
use crate::config::SearchConfig;
use crate::db::Store;
use crate::error::HarvestError;
use crate::models::{
    PatternProjectGroup, PatternRecord, PatternSet, ProjectRecord, ResultSet,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub patterns: PatternSet,
    pub result_set: ResultSet,
}

pub struct HarvestService<T, S = Store> {
    client: CachedClient<T, S>,
    urls: ApiUrls,
    search: SearchConfig,
}

impl<T: Transport, S: ResponseStore> HarvestService<T, S> {
    pub const fn new(client: CachedClient<T, S>, urls: ApiUrls, search: SearchConfig) -> Self {
        Self {
            client,
            urls,
            search,
        }
    }

    pub const fn client(&self) -> &CachedClient<T, S> {
        &self.client
    }

    /// Fetches the first patterns page, preserving API order.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::MalformedResponse`] if any item lacks `id`,
    /// `name` or `permalink`; no project is fetched in that case.
    pub async fn fetch_patterns(&self) -> Result<Vec<PatternRecord>, HarvestError> {
        let url = self.urls.patterns_search(&self.search)?;
        let fetched = self.client.fetch(&url).await?;
        let page: PatternSearchResponse = fetched.decode()?;

        let patterns: Vec<PatternRecord> =
            page.patterns.into_iter().map(PatternRecord::from).collect();

        for p in &patterns {
            debug!("[{}] [{}] [{}]", p.id, p.name, p.permalink);
        }

        Ok(patterns)
    }

    /// Fetches the first projects page for one pattern.
    ///
    /// Returns the group and whether the response came from the cache.
    pub async fn fetch_projects(
        &self,
        pattern: &PatternRecord,
    ) -> Result<(PatternProjectGroup, bool), HarvestError> {
        let url = self.urls.projects_search(&self.search, &pattern.permalink)?;
        let fetched = self.client.fetch(&url).await?;
        let page: ProjectSearchResponse = fetched.decode()?;

        let projects: Vec<ProjectRecord> =
            page.projects.into_iter().map(ProjectRecord::from).collect();

        Ok((
            PatternProjectGroup::new(pattern.permalink.clone(), projects),
            fetched.from_cache,
        ))
    }

    pub async fn run(&self) -> Result<HarvestOutcome, HarvestError> {
        info!(
            "Fetching patterns (craft={}, pc={}, sort={})",
            self.search.craft, self.search.pattern_category, self.search.sort
        );
        let patterns = self.fetch_patterns().await?;
        info!("Found {} patterns", patterns.len());

        let mut groups = Vec::with_capacity(patterns.len());
        let mut previous_from_cache = None;

        for (idx, pattern) in patterns.iter().enumerate() {
            if let Some(from_cache) = previous_from_cache
                && self.should_pause(from_cache)
            {
                tokio::time::sleep(self.search.politeness_delay()).await;
            }

            let (group, from_cache) = self.fetch_projects(pattern).await?;
            info!(
                "[{}/{}] {}: {} projects{}",
                idx + 1,
                patterns.len(),
                pattern.permalink,
                group.len(),
                if from_cache { " (cached)" } else { "" }
            );

            groups.push(group);
            previous_from_cache = Some(from_cache);
        }

        let stats = self.client.stats();
        info!(
            "Harvest complete: {} patterns, {} requests ({} cached)",
            patterns.len(),
            stats.hits + stats.misses,
            stats.hits
        );

        Ok(HarvestOutcome {
            patterns: PatternSet { patterns },
            result_set: ResultSet { projects: groups },
        })
    }

    fn should_pause(&self, previous_from_cache: bool) -> bool {
        if self.search.politeness_delay_ms == 0 {
            return false;
        }
        !(previous_from_cache && self.search.skip_delay_on_cache_hit)
    }
}
