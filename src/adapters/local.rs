use crate::core::ObjectStore;
use crate::utils::error::{ReportError, Result};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Filesystem-backed store: `bucket/key` lives at `<base_path>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    base_path: PathBuf,
}

impl LocalObjectStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let relative = Path::new(bucket).join(key);
        // 禁止跳出 base_path
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ReportError::StoreError {
                message: format!("Invalid object location {}/{}", bucket, key),
            });
        }
        Ok(self.base_path.join(relative))
    }
}

impl ObjectStore for LocalObjectStore {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        let source = self.object_path(bucket, key)?;

        match tokio::fs::copy(&source, destination).await {
            Ok(bytes) => {
                tracing::debug!("Copied {} bytes from {}", bytes, source.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReportError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn upload(&self, bucket: &str, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        let full_path = self.object_path(bucket, key)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!(
            "Wrote {} bytes ({}) to {}",
            data.len(),
            content_type,
            full_path.display()
        );
        Ok(())
    }
}
