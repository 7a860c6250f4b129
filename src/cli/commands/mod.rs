mod analyze;
mod find_projects;
mod pull_yarns;
mod whoami;

pub use analyze::cmd_analyze;
pub use find_projects::cmd_find_projects;
pub use pull_yarns::cmd_pull_yarns;
pub use whoami::cmd_whoami;

use anyhow::Context;

use crate::clients::{Credentials, RavelryClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{ApiUrls, CachedClient};

/// Builds the cached, signed client. Credentials are checked before the cache
/// is opened so a misconfigured run touches nothing.
async fn connect(config: &Config) -> anyhow::Result<(CachedClient<RavelryClient>, ApiUrls)> {
    let credentials = Credentials::from_env()?;
    let transport = RavelryClient::new(credentials, &config.api)?;
    let urls = ApiUrls::new(&config.api.base_url)?;

    let store = Store::new(&config.general.database_path)
        .await
        .with_context(|| {
            format!(
                "Failed to open response cache at {}",
                config.general.database_path
            )
        })?;

    Ok((CachedClient::new(transport, store), urls))
}
