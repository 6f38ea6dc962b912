//! In-memory `Storage` double.
//!
//! Presigned URLs have the shape
//! `https://storage.test/{bucket}/{percent-encoded key}?method=..&content-type=..&expires=..`
//! so tests can assert what was signed without an S3 endpoint.

use async_trait::async_trait;
use filegate_storage::{ObjectInfo, Storage, StorageError, StorageResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

pub const STORAGE_HOST: &str = "https://storage.test";

/// Characters left as-is when encoding a key into a URL path segment.
pub const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

#[derive(Default)]
pub struct MemoryStorage {
    bucket: String,
    objects: Mutex<HashMap<String, ObjectInfo>>,
    head_calls: Mutex<Vec<String>>,
    fail_signing: AtomicBool,
    fail_head: AtomicBool,
    hold_head: AtomicBool,
    head_entered: Notify,
    head_released: Notify,
}

impl MemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            ..Default::default()
        }
    }

    /// Simulate a completed client upload.
    pub fn insert_object(&self, key: &str, size: u64) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            ObjectInfo {
                key: key.to_string(),
                size: Some(size),
            },
        );
    }

    pub fn set_fail_signing(&self, fail: bool) {
        self.fail_signing.store(fail, Ordering::SeqCst);
    }

    /// Make `head` fail with a backend error for every key.
    pub fn set_fail_head(&self, fail: bool) {
        self.fail_head.store(fail, Ordering::SeqCst);
    }

    /// Park every `head` call until [`MemoryStorage::release_head`] is called.
    pub fn set_hold_head(&self, hold: bool) {
        self.hold_head.store(hold, Ordering::SeqCst);
    }

    /// Resolves once a `head` call has started.
    pub async fn wait_for_head(&self) {
        self.head_entered.notified().await;
    }

    pub fn release_head(&self) {
        self.hold_head.store(false, Ordering::SeqCst);
        self.head_released.notify_one();
    }

    /// Keys passed to `head`, in call order.
    pub fn head_calls(&self) -> Vec<String> {
        self.head_calls.lock().unwrap().clone()
    }

    /// Object key addressed by a URL this storage signed.
    pub fn resolve(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/{}/", STORAGE_HOST, self.bucket);
        let rest = url.strip_prefix(&prefix)?;
        let encoded = rest.split('?').next()?;
        percent_decode_str(encoded)
            .decode_utf8()
            .ok()
            .map(|key| key.into_owned())
    }

    fn sign(
        &self,
        method: &str,
        storage_key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(StorageError::Signing(
                "credentials unavailable".to_string(),
            ));
        }

        let mut url = format!(
            "{}/{}/{}?method={}",
            STORAGE_HOST,
            self.bucket,
            encode_key(storage_key),
            method
        );
        if let Some(content_type) = content_type {
            url.push_str("&content-type=");
            url.push_str(&encode_key(content_type));
        }
        url.push_str(&format!("&expires={}", expires_in.as_secs()));
        Ok(url)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.sign("PUT", storage_key, Some(content_type), expires_in)
    }

    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.sign("GET", storage_key, None, expires_in)
    }

    async fn head(&self, storage_key: &str) -> StorageResult<ObjectInfo> {
        self.head_calls
            .lock()
            .unwrap()
            .push(storage_key.to_string());

        if self.hold_head.load(Ordering::SeqCst) {
            self.head_entered.notify_one();
            self.head_released.notified().await;
        }

        if self.fail_head.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("connection reset".to_string()));
        }

        self.objects
            .lock()
            .unwrap()
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
