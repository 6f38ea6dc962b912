//! Configuration module
//!
//! Configuration is read once at startup (from the process environment, with an optional
//! `.env` file) and is read-only afterwards. Handlers receive it through the application state.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const SERVER_PORT: u16 = 3000;
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const STORAGE_MAX_ATTEMPTS: u32 = 1;

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_request_body_bytes: usize,
    pub http_concurrency_limit: usize,
    pub log_format: LogFormat,
}

/// Object store settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
    /// Attempts per storage call made by the S3 client; 1 means no retries.
    pub max_attempts: u32,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    /// Report an absent object as 404 and a failed lookup as 502 instead of 500 for both.
    pub separate_not_found_status: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = non_empty("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match non_empty("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            None => SERVER_PORT,
        };

        let max_request_body_bytes = match non_empty("MAX_REQUEST_BODY_BYTES") {
            Some(bytes) => bytes.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("MAX_REQUEST_BODY_BYTES must be a number of bytes: {}", e)
            })?,
            None => MAX_REQUEST_BODY_BYTES,
        };

        let http_concurrency_limit = match non_empty("HTTP_CONCURRENCY_LIMIT") {
            Some(limit) => limit.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be a positive integer: {}", e)
            })?,
            None => HTTP_CONCURRENCY_LIMIT,
        };

        let log_format = match non_empty("LOG_FORMAT") {
            Some(format) => format.trim().parse()?,
            None => LogFormat::Compact,
        };

        let bucket = non_empty("BUCKET_NAME")
            .or_else(|| non_empty("S3_BUCKET"))
            .ok_or_else(|| anyhow::anyhow!("BUCKET_NAME (or S3_BUCKET) must be set"))?;

        let region = non_empty("S3_REGION")
            .or_else(|| non_empty("AWS_REGION"))
            .ok_or_else(|| anyhow::anyhow!("S3_REGION or AWS_REGION must be set"))?;

        let endpoint = non_empty("S3_ENDPOINT");

        let max_attempts = match non_empty("STORAGE_MAX_ATTEMPTS") {
            Some(attempts) => attempts.trim().parse::<u32>().map_err(|e| {
                anyhow::anyhow!("STORAGE_MAX_ATTEMPTS must be a positive integer: {}", e)
            })?,
            None => STORAGE_MAX_ATTEMPTS,
        };

        let separate_not_found_status = non_empty("SEPARATE_NOT_FOUND_STATUS")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        Ok(Config {
            base: BaseConfig {
                server_port,
                cors_origins,
                environment,
                max_request_body_bytes,
                http_concurrency_limit,
                log_format,
            },
            storage: StorageConfig {
                bucket: bucket.trim().to_string(),
                region: region.trim().to_string(),
                endpoint: endpoint.map(|e| e.trim().to_string()),
                max_attempts,
            },
            separate_not_found_status,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage.bucket.contains('/') {
            return Err(anyhow::anyhow!(
                "BUCKET_NAME must be a bare bucket name, got '{}'",
                self.storage.bucket
            ));
        }

        if let Some(ref endpoint) = self.storage.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "S3_ENDPOINT must start with http:// or https://"
                ));
            }
        }

        if self.storage.max_attempts == 0 {
            return Err(anyhow::anyhow!("STORAGE_MAX_ATTEMPTS must be at least 1"));
        }

        if self.base.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("CORS_ORIGINS must list at least one origin"));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.max_request_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_REQUEST_BODY_BYTES cannot be 0"));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.base.log_format
    }

    pub fn bucket(&self) -> &str {
        &self.storage.bucket
    }

    pub fn region(&self) -> &str {
        &self.storage.region
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.storage.endpoint.as_deref()
    }

    pub fn storage_max_attempts(&self) -> u32 {
        self.storage.max_attempts
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
