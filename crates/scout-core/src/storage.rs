//! Durable key/value storage seam.

use async_trait::async_trait;

use crate::error::Result;

/// Asynchronous durable key/value storage surviving process restarts.
///
/// Every operation may fail with `ScoutError::Storage` (quota, I/O,
/// serialization); callers must not assume success. There is no
/// transactional multi-key guarantee: each key is written independently,
/// and the last successful write for a key wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
