use crate::core::aggregate::aggregate;
use crate::core::ingest::read_forecast_file;
use crate::core::{ConfigProvider, ForecastRecord, ObjectStore, Pipeline, ReportJob, Summary};
use crate::utils::error::Result;
use std::sync::Arc;

pub const SUMMARY_CONTENT_TYPE: &str = "application/json";
const LOCAL_FORECAST_FILE: &str = "forecast.csv";

/// Download → aggregate → upload for a single report job.
pub struct ReportPipeline<S: ObjectStore, C: ConfigProvider> {
    store: Arc<S>,
    config: Arc<C>,
    job: ReportJob,
}

impl<S: ObjectStore, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(store: Arc<S>, config: Arc<C>, job: ReportJob) -> Self {
        Self { store, config, job }
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ForecastRecord>> {
        let bucket = self.config.processed_bucket();

        // 暫存目錄在離開作用域時自動刪除（包含錯誤路徑）
        let scratch = tempfile::Builder::new()
            .prefix("forecast-report-")
            .tempdir()?;
        let local_path = scratch.path().join(LOCAL_FORECAST_FILE);

        tracing::debug!(
            "Downloading {}/{} to {}",
            bucket,
            self.job.forecast_csv_blob,
            local_path.display()
        );
        self.store
            .download(bucket, &self.job.forecast_csv_blob, &local_path)
            .await?;

        read_forecast_file(&local_path).await
    }

    async fn transform(&self, data: Vec<ForecastRecord>) -> Result<Summary> {
        Ok(aggregate(&data))
    }

    async fn load(&self, summary: &Summary) -> Result<String> {
        let bucket = self.config.processed_bucket();
        let payload = serde_json::to_vec(summary)?;

        tracing::debug!(
            "Uploading summary ({} bytes) to {}/{}",
            payload.len(),
            bucket,
            self.job.summary_blob
        );
        self.store
            .upload(
                bucket,
                &self.job.summary_blob,
                &payload,
                SUMMARY_CONTENT_TYPE,
            )
            .await?;

        Ok(self.job.summary_blob.clone())
    }
}
