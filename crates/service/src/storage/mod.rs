//! Storage abstractions for the service layer
//!
//! `KeyValueStore` is the persistence port the backends write the client
//! session through. `JsonMapStore` is the reusable file-backed map behind
//! both the file session store and the file identity repository.

pub mod file;
pub mod json_map_store;
pub mod memory;

use async_trait::async_trait;

use crate::errors::BackendError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Small string key-value persistence port.
///
/// Writes are last-write-wins; no transactional guarantee spans keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;
    async fn set(&self, key: &str, value: String) -> Result<(), BackendError>;
    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), BackendError>;
}
