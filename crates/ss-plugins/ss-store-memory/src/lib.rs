//! # ss-store-memory
//!
//! In-memory implementation of `RecordStore` over a concurrent map.
//! This is the mock-backend mode: same whole-partition-per-key contract
//! as the durable adapters, nothing survives the process.

use async_trait::async_trait;
use dashmap::DashMap;
use ss_core::traits::RecordStore;

#[derive(Default)]
pub struct MemoryRecordStore {
    partitions: DashMap<String, String>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live partitions, for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.partitions.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.partitions.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.partitions.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_round_trip() {
        let store = MemoryRecordStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.put("k", "[1,2,3]").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2,3]"));

        store.put("k", "[]").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[]"));

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // Deleting an absent key is a no-op.
        store.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryRecordStore::new();
        store.put("a", "1").await.unwrap();
        store.put("b", "2").await.unwrap();
        store.delete("a").await.unwrap();
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }
}
