use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::oauth::{Credentials, OAuthSigner};
use crate::config::ApiConfig;
use crate::error::HarvestError;

/// Raw response of a GET: status passed through untouched, body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The seam between the pipeline and the network.
///
/// Implementations issue exactly one request per call: no retries, no rate
/// limiting, no status interpretation.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, HarvestError>;
}

pub struct RavelryClient {
    client: Client,
    signer: OAuthSigner,
}

impl RavelryClient {
    pub fn new(credentials: Credentials, config: &ApiConfig) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| HarvestError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(credentials),
        })
    }
}

#[async_trait::async_trait]
impl Transport for RavelryClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HarvestError> {
        let parsed = Url::parse(url).map_err(|e| HarvestError::transport(url, e))?;
        let authorization = self.signer.authorization_header("GET", &parsed)?;

        debug!("GET {}", url);

        let response = self
            .client
            .get(parsed)
            .header("Authorization", authorization)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| HarvestError::transport(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HarvestError::transport(url, e))?;

        Ok(HttpResponse { status, body })
    }
}

// ----------------------------------------------------------------------------
// Response payloads. Only the fields the pipeline reads are declared; serde
// ignores the rest and rejects missing or mis-typed ones.
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PatternSearchResponse {
    pub patterns: Vec<ApiPattern>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPattern {
    pub id: i64,
    pub name: String,
    pub permalink: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSearchResponse {
    pub projects: Vec<ApiProject>,
}

#[derive(Debug, Deserialize)]
pub struct ApiProject {
    pub id: i64,
    pub name: String,
    pub permalink: String,
    pub pattern_id: i64,
    pub user_id: i64,
    pub user: ApiUser,
    pub status_name: String,
    pub tag_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectDetailResponse {
    pub project: ApiProjectDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiProjectDetail {
    pub id: i64,
    pub pattern_id: Option<i64>,
    pub favorites_count: i64,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub completed: Option<String>,
    pub packs: Vec<ApiPack>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPack {
    pub id: Option<i64>,
    #[serde(default)]
    pub yarn_id: Option<i64>,
    #[serde(default)]
    pub yarn_name: Option<String>,
    #[serde(default)]
    pub yarn: Option<ApiPackYarn>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPackYarn {
    pub permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct YarnDetailResponse {
    pub yarn: ApiYarn,
}

#[derive(Debug, Deserialize)]
pub struct ApiYarn {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub fiber_content: Vec<ApiFiberContent>,
}

#[derive(Debug, Deserialize)]
pub struct ApiFiberContent {
    pub fiber_type: String,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub user: ApiUser,
}
