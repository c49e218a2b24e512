//! # ss-store-sqlite
//!
//! Durable `RecordStore` over SQLite: one row per partition key, the
//! whole JSON document in a TEXT column. An upsert per `put` keeps the
//! per-key atomicity the services rely on.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use ss_core::traits::RecordStore;
use std::str::FromStr;

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Opens (creating if needed) the database and its single table.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS records (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        log::debug!("sqlite record store ready at {url}");
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO records (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM records WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_round_trip() {
        let store = SqliteRecordStore::new("sqlite::memory:").await.unwrap();

        assert_eq!(store.get("notifications:u1").await.unwrap(), None);

        store.put("notifications:u1", "[{\"id\":1}]").await.unwrap();
        assert_eq!(
            store.get("notifications:u1").await.unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );

        // Upsert replaces the whole document.
        store.put("notifications:u1", "[]").await.unwrap();
        assert_eq!(
            store.get("notifications:u1").await.unwrap().as_deref(),
            Some("[]")
        );

        store.delete("notifications:u1").await.unwrap();
        assert_eq!(store.get("notifications:u1").await.unwrap(), None);

        // Absent-key delete is a no-op.
        store.delete("notifications:u1").await.unwrap();
    }
}
