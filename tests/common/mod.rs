//! Scripted upstream and stores shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ravelry_harvest::clients::{HttpResponse, Transport};
use ravelry_harvest::config::{Config, SearchConfig};
use ravelry_harvest::error::HarvestError;
use ravelry_harvest::services::{ApiUrls, ResponseStore};
use tokio::time::Instant;

/// Answers from a fixed URL table and records when each URL was requested.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    routes: Arc<HashMap<String, HttpResponse>>,
    calls: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl ScriptedTransport {
    pub fn new(routes: Vec<(String, &str)>) -> Self {
        Self::with_responses(
            routes
                .into_iter()
                .map(|(url, body)| (url, 200, body.to_string()))
                .collect(),
        )
    }

    pub fn with_responses(routes: Vec<(String, u16, String)>) -> Self {
        let routes = routes
            .into_iter()
            .map(|(url, status, body)| (url, HttpResponse { status, body }))
            .collect();
        Self {
            routes: Arc::new(routes),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    /// Time of every call relative to the first one.
    pub fn call_offsets(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        let Some((_, first)) = calls.first() else {
            return Vec::new();
        };
        calls.iter().map(|(_, at)| at.duration_since(*first)).collect()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, HarvestError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::transport(url, "no scripted response"))
    }
}

/// In-process cache; clones share entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, HttpResponse>>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ResponseStore for MemoryStore {
    async fn lookup(&self, signature: &str) -> anyhow::Result<Option<HttpResponse>> {
        Ok(self.entries.lock().unwrap().get(signature).cloned())
    }

    async fn persist(&self, signature: &str, response: &HttpResponse) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .entry(signature.to_string())
            .or_insert_with(|| response.clone());
        Ok(())
    }
}

/// SQLite file inside a temp dir that is removed when this value drops.
pub struct TempDb {
    _dir: tempfile::TempDir,
    pub url: String,
}

pub fn temp_db() -> TempDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let url = format!("sqlite:{}", dir.path().join("cache.db").display());
    TempDb { _dir: dir, url }
}

pub fn no_delay_search() -> SearchConfig {
    SearchConfig {
        politeness_delay_ms: 0,
        detail_delay_ms: 0,
        pattern_group_delay_ms: 0,
        ..SearchConfig::default()
    }
}

pub fn urls() -> ApiUrls {
    ApiUrls::new(&Config::default().api.base_url).unwrap()
}

pub const CARDI_PATTERNS: &str = r#"{"patterns":[{"id":1,"name":"Cardi","permalink":"cardi"}]}"#;

pub const CARDI_PROJECTS: &str = r#"{"projects":[{"id":99,"name":"My Cardi","permalink":"my-cardi","pattern_id":1,"user_id":5,"user":{"username":"alice"},"status_name":"finished","tag_names":["wool"]}]}"#;

pub fn project_json(id: i64, username: &str) -> String {
    format!(
        r#"{{"id":{id},"name":"p{id}","permalink":"p{id}","pattern_id":1,"user_id":{id},"username":"{username}","status":"finished","tag_names":[]}}"#
    )
}

pub fn detail_json(id: i64, yarn_ids: &[i64]) -> String {
    let packs: Vec<String> = yarn_ids
        .iter()
        .enumerate()
        .map(|(n, yarn_id)| {
            format!(r#"{{"id":{},"yarn_id":{yarn_id},"yarn_name":"Yarn {yarn_id}"}}"#, n + 1)
        })
        .collect();
    format!(
        r#"{{"project":{{"id":{id},"pattern_id":1,"favorites_count":0,"packs":[{}]}}}}"#,
        packs.join(",")
    )
}
