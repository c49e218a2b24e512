//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the services.

use async_trait::async_trait;

/// Key/value persistence contract for partitioned record documents.
///
/// Each logical partition (an owner's notifications, the global post list,
/// the session record) is one opaque JSON string under one key. The whole
/// document is replaced on every write, so readers that run after a `put`
/// resolves never observe a partial partition.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Deleting an absent key is a no-op, not an error.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Password hashing contract.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hashes a password into a self-describing string (e.g., PHC format).
    async fn hash_password(&self, password: &str) -> anyhow::Result<String>;

    /// Verifies a password against a stored hash. An unparseable hash
    /// verifies as false rather than erroring.
    async fn verify_password(&self, password: &str, hash: &str) -> bool;
}
