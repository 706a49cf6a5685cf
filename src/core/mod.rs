pub mod aggregate;
pub mod engine;
pub mod ingest;
pub mod pipeline;

pub use crate::domain::model::{ForecastRecord, ReportJob, ReportOutcome, Summary};
pub use crate::domain::ports::{ConfigProvider, ObjectStore, Pipeline};
pub use crate::utils::error::Result;

use engine::ReportEngine;
use pipeline::ReportPipeline;
use std::sync::Arc;

/// Builds a pipeline for `job` and runs it to completion.
pub async fn generate_report<S, C>(store: Arc<S>, config: Arc<C>, job: ReportJob) -> Result<ReportOutcome>
where
    S: ObjectStore,
    C: ConfigProvider,
{
    ReportEngine::new(ReportPipeline::new(store, config, job))
        .run()
        .await
}
