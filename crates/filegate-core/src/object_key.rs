//! Object key generation.
//!
//! Key format: `{code}_{filename}` where `code` is [`CODE_LENGTH`] characters drawn from
//! `[A-Za-z0-9]` using the operating system CSPRNG and `filename` is the last path segment of
//! the client-supplied name. Keys never contain `/` or `\`, so a caller cannot place an object
//! outside the bucket's flat namespace.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::constants::CODE_LENGTH;
use crate::error::AppError;

/// Generate a random code of [`CODE_LENGTH`] alphanumeric characters.
///
/// Codes act as unguessable identifiers, so they are drawn from `OsRng` rather than a seeded
/// generator. 62^12 possible values; uniqueness is probabilistic only.
///
/// # Panics
/// Panics if the operating system entropy source is unavailable.
pub fn generate_code() -> String {
    let mut rng = OsRng.unwrap_err();
    Alphanumeric.sample_string(&mut rng, CODE_LENGTH)
}

/// Strip every directory component from `filename`, under both `/` and `\` separators.
///
/// Returns `None` when nothing is left (e.g. `"reports/"`).
pub fn sanitize_filename(filename: &str) -> Option<&str> {
    let after_slash = filename.rsplit('/').next().unwrap_or(filename);
    let name = after_slash.rsplit('\\').next().unwrap_or(after_slash);

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Storage key of an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    key: String,
}

impl ObjectKey {
    /// Build a fresh key for `filename`: a new random code joined to the sanitized name.
    pub fn generate(filename: &str) -> Result<Self, AppError> {
        let name = sanitize_filename(filename).ok_or_else(|| {
            AppError::InvalidInput("filename must name a file, not a directory".to_string())
        })?;

        Ok(Self::from_parts(&generate_code(), name))
    }

    fn from_parts(code: &str, name: &str) -> Self {
        ObjectKey {
            key: format!("{}_{}", code, name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn into_string(self) -> String {
        self.key
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.key)
    }
}
