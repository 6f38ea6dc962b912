//! Filegate Core Library
//!
//! This crate provides the domain types shared by the storage and API crates:
//! configuration, the error taxonomy, request/response models and the object key
//! scheme (`<random-code>_<sanitized-filename>`).

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod object_key;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel, SignedOperation};
pub use object_key::{generate_code, sanitize_filename, ObjectKey};
