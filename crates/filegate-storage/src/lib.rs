//! Filegate Storage Library
//!
//! This crate provides the storage abstraction the file access handlers depend on, and its
//! S3 implementation. Storage only signs URLs and answers existence checks; clients move the
//! bytes directly against the object store.

pub mod factory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectInfo, Storage, StorageError, StorageResult};
