use crate::core::{Pipeline, ReportOutcome};
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order. Nothing is uploaded unless
    /// the first two phases succeed.
    pub async fn run(&self) -> Result<ReportOutcome> {
        let started = Instant::now();

        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} forecast records", records.len());

        let record_count = records.len();
        let summary = self.pipeline.transform(records).await?;
        tracing::info!(
            "🧮 Aggregated {} records into {} stores (grand total {})",
            record_count,
            summary.stores.len(),
            summary.grand_total_forecast
        );

        let stored_at = self.pipeline.load(&summary).await?;
        tracing::info!(
            "📁 Summary stored at {} in {:?}",
            stored_at,
            started.elapsed()
        );

        Ok(ReportOutcome::ok(summary, stored_at))
    }
}
