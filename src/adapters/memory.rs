use crate::core::ObjectStore;
use crate::utils::error::{ReportError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-process object store. Clones share the same objects and counters.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<HashMap<(String, String), StoredObject>>>,
    downloads: Arc<AtomicUsize>,
    uploads: Arc<AtomicUsize>,
    reject_uploads: Arc<AtomicBool>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, bucket: &str, key: &str, data: Vec<u8>) {
        let mut objects = self.objects.lock().await;
        objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: "text/csv".to_string(),
            },
        );
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        let objects = self.objects.lock().await;
        objects.get(&(bucket.to_string(), key.to_string())).cloned()
    }

    /// Makes every subsequent upload fail with a store error.
    pub fn reject_uploads(&self, reject: bool) {
        self.reject_uploads.store(reject, Ordering::SeqCst);
    }

    /// Number of download attempts, successful or not.
    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    /// Number of upload attempts, successful or not.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        self.downloads.fetch_add(1, Ordering::SeqCst);

        let data = {
            let objects = self.objects.lock().await;
            objects
                .get(&(bucket.to_string(), key.to_string()))
                .map(|object| object.data.clone())
                .ok_or_else(|| ReportError::ObjectNotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })?
        };

        tokio::fs::write(destination, data).await?;
        Ok(())
    }

    async fn upload(&self, bucket: &str, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);

        if self.reject_uploads.load(Ordering::SeqCst) {
            return Err(ReportError::StoreError {
                message: format!("upload of {}/{} rejected", bucket, key),
            });
        }

        let mut objects = self.objects.lock().await;
        objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
