//! Storage abstraction trait
//!
//! This module defines the capability surface the handlers consume from the object store:
//! presigning PUT/GET URLs for a key and checking that a key exists. File bytes never pass
//! through this interface.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
///
/// `NotFound` is kept apart from `Backend` so callers can tell an absent object from a
/// storage fault.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Presigning failed: {0}")]
    Signing(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Metadata returned by an existence check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: Option<u64>,
}

/// Storage abstraction trait
///
/// Implementations are constructed once per process and shared read-only behind an `Arc`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Generate a presigned PUT URL for `storage_key`, bound to `content_type`.
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Generate a presigned GET URL for `storage_key`.
    ///
    /// Does not check that the object exists; call [`Storage::head`] first.
    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Metadata-only lookup. Returns `StorageError::NotFound` when the key is absent.
    async fn head(&self, storage_key: &str) -> StorageResult<ObjectInfo>;

    /// Bucket this storage is scoped to
    fn bucket(&self) -> &str;
}
