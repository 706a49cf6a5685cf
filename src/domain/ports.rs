use crate::domain::model::{ForecastRecord, Summary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Blob storage used for the forecast input and the summary output.
pub trait ObjectStore: Send + Sync {
    /// Fetches `bucket/key` into the local file at `destination`.
    fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn processed_bucket(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ForecastRecord>>;
    async fn transform(&self, data: Vec<ForecastRecord>) -> Result<Summary>;
    async fn load(&self, summary: &Summary) -> Result<String>;
}
