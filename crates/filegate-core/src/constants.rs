//! Fixed values of the access scheme.

use std::time::Duration;

/// Length of the random code prefixed to every object key.
pub const CODE_LENGTH: usize = 12;

/// Validity window of a presigned upload (PUT) URL: 5 minutes.
pub const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(300);

/// Validity window of a presigned download (GET) URL: 1 hour.
pub const DOWNLOAD_URL_EXPIRY: Duration = Duration::from_secs(3600);

/// Content type signed into upload URLs when the client does not provide one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
