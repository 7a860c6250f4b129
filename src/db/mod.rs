use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::cache::CachedResponse;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Single connection: the pipeline is sequential.
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(1)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!("Response cache opened & migrations applied");

        Ok(Self { conn })
    }

    fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    pub async fn get_cached_response(&self, signature: &str) -> Result<Option<CachedResponse>> {
        self.cache_repo().get(signature).await
    }

    pub async fn cache_response(&self, signature: &str, status: u16, body: &str) -> Result<()> {
        self.cache_repo().insert(signature, status, body).await
    }

    pub async fn cached_response_count(&self) -> Result<u64> {
        self.cache_repo().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("cache.db");
        let store = Store::new(&format!("sqlite:{}", db_path.display()))
            .await
            .expect("failed to open store");
        (store, dir)
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let (store, _dir) = temp_store().await;

        let url = "https://api.ravelry.com/patterns/search.json?craft=knitting&page=1";
        assert!(store.get_cached_response(url).await.unwrap().is_none());

        store.cache_response(url, 200, r#"{"patterns":[]}"#).await.unwrap();

        let cached = store.get_cached_response(url).await.unwrap().unwrap();
        assert_eq!(cached.signature, url);
        assert_eq!(cached.status, 200);
        assert_eq!(cached.body, r#"{"patterns":[]}"#);
        assert_eq!(store.cached_response_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cache_entries_are_write_once() {
        let (store, _dir) = temp_store().await;
        let url = "https://api.ravelry.com/current_user.json";

        store.cache_response(url, 200, "first").await.unwrap();
        store.cache_response(url, 500, "second").await.unwrap();

        let cached = store.get_cached_response(url).await.unwrap().unwrap();
        assert_eq!(cached.body, "first");
        assert_eq!(cached.status, 200);
        assert_eq!(store.cached_response_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_signatures_differ_by_query_string() {
        let (store, _dir) = temp_store().await;

        store
            .cache_response("https://x.test/p.json?page=1", 200, "one")
            .await
            .unwrap();
        assert!(
            store
                .get_cached_response("https://x.test/p.json?page=2")
                .await
                .unwrap()
                .is_none()
        );
    }
}
