//! # Partition access helpers
//!
//! All services read and write whole partitions through these functions.
//! A document that fails to parse is treated as absent: the caller gets
//! the empty collection and the anomaly is logged, never raised.

use serde::de::DeserializeOwned;
use serde::Serialize;
use ss_core::error::{AppError, Result};
use ss_core::traits::RecordStore;

/// Loads a partition as a record array. Missing or corrupt ⇒ empty.
pub(crate) async fn load<T: DeserializeOwned>(
    store: &dyn RecordStore,
    key: &str,
) -> Result<Vec<T>> {
    let raw = match store.get(key).await? {
        Some(raw) => raw,
        None => return Ok(Vec::new()),
    };
    match serde_json::from_str(&raw) {
        Ok(records) => Ok(records),
        Err(err) => {
            log::warn!("partition {key} failed to parse, treating as empty: {err}");
            Ok(Vec::new())
        }
    }
}

/// Replaces a partition with the given record array in one write.
pub(crate) async fn save<T: Serialize>(
    store: &dyn RecordStore,
    key: &str,
    records: &[T],
) -> Result<()> {
    let raw = serde_json::to_string(records)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    store.put(key, &raw).await?;
    Ok(())
}

/// Loads a single-record partition (e.g., the session). Corrupt ⇒ `None`.
pub(crate) async fn load_one<T: DeserializeOwned>(
    store: &dyn RecordStore,
    key: &str,
) -> Result<Option<T>> {
    let raw = match store.get(key).await? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(err) => {
            log::warn!("partition {key} failed to parse, treating as empty: {err}");
            Ok(None)
        }
    }
}

/// Replaces a single-record partition.
pub(crate) async fn save_one<T: Serialize>(
    store: &dyn RecordStore,
    key: &str,
    record: &T,
) -> Result<()> {
    let raw = serde_json::to_string(record)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    store.put(key, &raw).await?;
    Ok(())
}
