//! soulsync/crates/ss-core/src/lib.rs
//!
//! The central domain types and interface definitions for SoulSync.

pub mod error;
pub mod keys;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
