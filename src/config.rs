use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::{RAVELRY_API, files};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub api: ApiConfig,

    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// SQLite URL of the response cache.
    pub database_path: String,

    /// Directory holding the stored result sets, yarn details and analysis output.
    pub data_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            database_path: "sqlite:data/ravelry_cache.db".to_string(),
            data_dir: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,

    pub user_agent: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: RAVELRY_API.to_string(),
            user_agent: "RavelryHarvest/0.1".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_seconds))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub craft: String,

    /// Pattern category, sent as `pc`.
    pub pattern_category: String,

    pub sort: String,

    pub pattern_page_size: u32,

    pub project_page_size: u32,

    pub project_status: String,

    /// Pause between pattern iterations while searching projects.
    pub politeness_delay_ms: u64,

    /// Pause between project detail requests.
    pub detail_delay_ms: u64,

    /// Pause between pattern groups while pulling project details.
    pub pattern_group_delay_ms: u64,

    /// Skip the politeness delay when the previous response came from the cache.
    /// Off by default so run timing matches a cold run.
    pub skip_delay_on_cache_hit: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            craft: "knitting".to_string(),
            pattern_category: "sweater".to_string(),
            sort: "popularity".to_string(),
            pattern_page_size: 100,
            project_page_size: 100,
            project_status: "finished".to_string(),
            politeness_delay_ms: 100,
            detail_delay_ms: 100,
            pattern_group_delay_ms: 5000,
            skip_delay_on_cache_hit: false,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    #[must_use]
    pub const fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }

    #[must_use]
    pub const fn pattern_group_delay(&self) -> Duration {
        Duration::from_millis(self.pattern_group_delay_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ravelry-harvest").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ravelry-harvest").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            anyhow::bail!("API base URL cannot be empty");
        }

        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;

        if self.search.craft.is_empty() || self.search.pattern_category.is_empty() {
            anyhow::bail!("Search craft and pattern category must be set");
        }

        if self.search.pattern_page_size == 0 || self.search.project_page_size == 0 {
            anyhow::bail!("Search page sizes must be > 0");
        }

        Ok(())
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.data_dir)
    }

    #[must_use]
    pub fn projects_path(&self) -> PathBuf {
        self.data_dir().join(files::STORED_PROJECTS)
    }

    #[must_use]
    pub fn pattern_index_path(&self) -> PathBuf {
        self.data_dir().join(files::PATTERN_INDEX)
    }

    #[must_use]
    pub fn yarn_detail_dir(&self) -> PathBuf {
        self.data_dir().join(files::YARN_DETAIL_DIR)
    }

    #[must_use]
    pub fn yarn_catalog_path(&self) -> PathBuf {
        self.data_dir().join(files::YARN_CATALOG)
    }

    #[must_use]
    pub fn yarn_fibers_path(&self) -> PathBuf {
        self.data_dir().join(files::YARN_FIBERS)
    }

    #[must_use]
    pub fn analysis_dir(&self) -> PathBuf {
        self.data_dir().join(files::ANALYSIS_DIR)
    }
}
