//! # Storage Traits
//!
//! The key-value abstraction the rest of the backend persists through.
//! Values are opaque strings (JSON in practice); the typed layer lives in
//! [`super::record_store`].

use anyhow::Result;
use async_trait::async_trait;

/// A local key-value store.
///
/// There is a single writer and no concurrent access from other processes,
/// so implementations make no conflict-resolution guarantees.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Retrieve a value by its key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;
}
