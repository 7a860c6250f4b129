//! Signature-keyed response cache wrapped around a [`Transport`].
//!
//! The cache is an optimization only: with an empty store the output of a run
//! is identical, just with more live requests.

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::clients::ravelry::{HttpResponse, Transport};
use crate::db::Store;
use crate::error::HarvestError;

/// Persistent key -> response store backing [`CachedClient`].
#[async_trait::async_trait]
pub trait ResponseStore: Send + Sync {
    async fn lookup(&self, signature: &str) -> anyhow::Result<Option<HttpResponse>>;

    async fn persist(&self, signature: &str, response: &HttpResponse) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl ResponseStore for Store {
    async fn lookup(&self, signature: &str) -> anyhow::Result<Option<HttpResponse>> {
        Ok(self
            .get_cached_response(signature)
            .await?
            .map(|cached| HttpResponse {
                status: cached.status,
                body: cached.body,
            }))
    }

    async fn persist(&self, signature: &str, response: &HttpResponse) -> anyhow::Result<()> {
        self.cache_response(signature, response.status, &response.body)
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub from_cache: bool,
}

impl Fetched {
    /// Decodes the body, mapping any missing or mis-typed field to
    /// [`HarvestError::MalformedResponse`].
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, HarvestError> {
        serde_json::from_str(&self.body)
            .map_err(|e| HarvestError::malformed(&self.url, format!("{e} (HTTP {})", self.status)))
    }

    pub fn require_success(&self) -> Result<(), HarvestError> {
        if (200..300).contains(&self.status) {
            Ok(())
        } else {
            Err(HarvestError::UnexpectedStatus {
                url: self.url.clone(),
                status: self.status,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct CachedClient<T, S = Store> {
    transport: T,
    store: S,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Transport, S: ResponseStore> CachedClient<T, S> {
    pub const fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached response for `url`, or performs the live call and
    /// stores it.
    ///
    /// A failed cache read is treated as a miss. A failed cache write is
    /// fatal: the live call happened and must not go unrecorded.
    pub async fn fetch(&self, url: &str) -> Result<Fetched, HarvestError> {
        match self.store.lookup(url).await {
            Ok(Some(hit)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit: {}", url);
                return Ok(Fetched {
                    url: url.to_string(),
                    status: hit.status,
                    body: hit.body,
                    from_cache: true,
                });
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {}, treating as miss: {}", url, e),
        }

        let response = self.transport.get(url).await?;
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss: {} (HTTP {})", url, response.status);

        self.store
            .persist(url, &response)
            .await
            .map_err(|e| HarvestError::CachePersist {
                signature: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Fetched {
            url: url.to_string(),
            status: response.status,
            body: response.body,
            from_cache: false,
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// The undecorated transport, for calls that must never be cached.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
