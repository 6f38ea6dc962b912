use crate::traits::{ObjectInfo, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::time::Duration;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `max_attempts` - SDK attempts per call; `1` disables retries
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        max_attempts: u32,
    ) -> StorageResult<Self> {
        if max_attempts == 0 {
            return Err(StorageError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));
        let retry_config = RetryConfig::standard().with_max_attempts(max_attempts);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config.clone())
            .load()
            .await;

        let client = if let Some(ref endpoint) = endpoint_url {
            // Path-style addressing is required by MinIO and most S3-compatible providers
            let s3_config = aws_sdk_s3::config::Builder::from(&config)
                .endpoint_url(endpoint)
                .retry_config(retry_config)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        } else {
            Client::new(&config)
        };

        tracing::debug!(
            bucket = %bucket,
            endpoint = ?endpoint_url,
            max_attempts,
            "S3 client configured"
        );

        Ok(S3Storage { client, bucket })
    }

    fn presigning_config(expires_in: Duration) -> StorageResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in).map_err(|e| StorageError::Signing(e.to_string()))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = Self::presigning_config(expires_in)?;

        let presigned_request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .content_type(content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 presign PUT failed"
                );
                StorageError::Signing(e.to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            expires_in_seconds = expires_in.as_secs(),
            "Generated presigned PUT URL"
        );

        Ok(presigned_request.uri().to_string())
    }

    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = Self::presigning_config(expires_in)?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 presign GET failed"
                );
                StorageError::Signing(e.to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            expires_in_seconds = expires_in.as_secs(),
            "Generated presigned GET URL"
        );

        Ok(presigned_request.uri().to_string())
    }

    async fn head(&self, storage_key: &str) -> StorageResult<ObjectInfo> {
        let start = std::time::Instant::now();

        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .send()
            .await;

        match result {
            Ok(output) => {
                tracing::debug!(
                    bucket = %self.bucket,
                    key = %storage_key,
                    size_bytes = ?output.content_length(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 head successful"
                );

                Ok(ObjectInfo {
                    key: storage_key.to_string(),
                    size: output
                        .content_length()
                        .and_then(|len| u64::try_from(len).ok()),
                })
            }
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                tracing::debug!(
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 head: object not found"
                );
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 head failed"
                );
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presigning_config_rejects_over_one_week() {
        assert!(S3Storage::presigning_config(Duration::from_secs(300)).is_ok());
        assert!(S3Storage::presigning_config(Duration::from_secs(3600)).is_ok());
        match S3Storage::presigning_config(Duration::from_secs(8 * 24 * 3600)) {
            Err(StorageError::Signing(_)) => {}
            other => panic!("Expected Signing error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_new_rejects_zero_attempts() {
        let result = S3Storage::new("bucket".to_string(), "us-east-1".to_string(), None, 0).await;
        assert!(matches!(result, Err(StorageError::Config(_))));
    }

    #[tokio::test]
    async fn test_presigned_urls_are_scoped_to_key() {
        // Presigning is a local computation given static credentials.
        std::env::set_var("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
        std::env::set_var("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");

        let storage = S3Storage::new(
            "filegate-test".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000".to_string()),
            1,
        )
        .await
        .unwrap();

        let put_url = storage
            .presigned_put_url(
                "abcDEF123456_report.pdf",
                "application/pdf",
                Duration::from_secs(300),
            )
            .await
            .unwrap();
        assert!(put_url.starts_with("http://localhost:9000/filegate-test/abcDEF123456_report.pdf?"));
        assert!(put_url.contains("X-Amz-Expires=300"));
        assert!(put_url.contains("X-Amz-Signature="));

        let get_url = storage
            .presigned_get_url("abcDEF123456_report.pdf", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(get_url.starts_with("http://localhost:9000/filegate-test/abcDEF123456_report.pdf?"));
        assert!(get_url.contains("X-Amz-Expires=3600"));
        assert_eq!(storage.bucket(), "filegate-test");
    }
}
