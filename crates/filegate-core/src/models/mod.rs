//! Request and response models for the file access endpoints.

pub mod upload;

pub use upload::{UploadRequest, UploadResponse};
