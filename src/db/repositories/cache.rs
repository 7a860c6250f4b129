use crate::entities::{prelude::*, response_cache};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

/// Repository for the signature-keyed response cache.
///
/// Entries are written once per signature and never updated or expired.
pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: response_cache::Model) -> CachedResponse {
        CachedResponse {
            signature: m.signature,
            status: u16::try_from(m.status).unwrap_or_default(),
            body: m.body,
        }
    }

    pub async fn get(&self, signature: &str) -> Result<Option<CachedResponse>> {
        let row = ResponseCache::find_by_id(signature.to_string())
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    /// Inserts the entry unless the signature is already present.
    pub async fn insert(&self, signature: &str, status: u16, body: &str) -> Result<()> {
        let active_model = response_cache::ActiveModel {
            signature: Set(signature.to_string()),
            status: Set(i32::from(status)),
            body: Set(body.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        ResponseCache::insert(active_model)
            .on_conflict(
                OnConflict::column(response_cache::Column::Signature)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(ResponseCache::find().count(&self.conn).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub signature: String,
    pub status: u16,
    pub body: String,
}
