use crate::core::ObjectStore;
use crate::utils::error::{ReportError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Loads credentials from the default AWS chain. A custom endpoint
    /// (MinIO, GCS interop) switches to path-style addressing.
    pub async fn from_settings(region: &str, endpoint: Option<&str>) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&config).region(Region::new(region.to_string()));

        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::new(S3Client::from_conf(builder.build()))
    }
}

impl ObjectStore for S3ObjectStore {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => ReportError::ObjectNotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                },
                err => ReportError::StoreError {
                    message: format!("Failed to read s3://{}/{}: {}", bucket, key, err),
                },
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| ReportError::StoreError {
                message: format!("Failed to collect s3://{}/{}: {}", bucket, key, e),
            })?;

        tokio::fs::write(destination, data.into_bytes()).await?;
        Ok(())
    }

    async fn upload(&self, bucket: &str, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|err| ReportError::StoreError {
                message: format!(
                    "Failed to write s3://{}/{}: {}",
                    bucket,
                    key,
                    err.into_service_error()
                ),
            })?;

        Ok(())
    }
}
