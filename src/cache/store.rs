//! Persistent lookup cache backed by the `cache` table.
//!
//! Entries are keyed by (key, type); the same subject string under different
//! entry types is two independent entries. Entries are never expired or
//! evicted here; a later write for the same subject replaces the value.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::debug;

use crate::models::EntryType;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cache database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt cache value for key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Manages reads and writes of memoized lookup results. Cheap to clone; all
/// clones share the underlying connection pool.
#[derive(Clone)]
pub struct CacheStore {
    pool: SqlitePool,
}

impl CacheStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the cached value for (key, entry_type), if any.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        entry_type: EntryType,
    ) -> Result<Option<T>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT value FROM cache WHERE key = ? AND type = ?")
            .bind(key)
            .bind(entry_type.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        match row {
            Some(row) => {
                debug!("cache hit for {} {}", entry_type, key);
                let payload: String = row.get("value");
                let value = serde_json::from_str(&payload).map_err(|source| StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                })?;
                Ok(Some(value))
            }
            None => {
                debug!("cache miss for {} {}", entry_type, key);
                Ok(None)
            }
        }
    }

    /// Store a value for (key, entry_type). If an entry already exists its
    /// value and updated_at are replaced; created_at is kept. Last write wins
    /// when concurrent puts race for the same key.
    pub async fn put<T: Serialize>(
        &self,
        key: &str,
        entry_type: EntryType,
        value: &T,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_string(value).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        let now = Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cache (key, type, value, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(key, type)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(entry_type.as_str())
        .bind(&payload)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("cached {} entry for {}", entry_type, key);
        Ok(())
    }
}
