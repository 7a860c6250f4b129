use super::connect;
use crate::clients::ravelry::{CurrentUserResponse, Transport};
use crate::config::Config;
use crate::error::HarvestError;

/// Always live: a cached answer would say nothing about the credentials.
pub async fn cmd_whoami(config: &Config) -> anyhow::Result<()> {
    let (client, urls) = connect(config).await?;
    let url = urls.current_user()?;

    let response = client.transport().get(&url).await?;
    if !response.is_success() {
        return Err(HarvestError::UnexpectedStatus {
            url,
            status: response.status,
        }
        .into());
    }

    let current: CurrentUserResponse = serde_json::from_str(&response.body)
        .map_err(|e| HarvestError::malformed(&url, e.to_string()))?;

    println!("Authenticated as {}", current.user.username);
    Ok(())
}
