use crate::core::{generate_report, ObjectStore, ReportJob, ReportOutcome};
use crate::server::AppState;
use crate::utils::error::ReportError;
use axum::{
    extract::{rejection::FormRejection, Query, State},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// `POST /report` parameters, accepted from the query string or a form body.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportParams {
    pub forecast_blob: Option<String>,
    pub forecast_csv_blob: Option<String>,
    pub summary_blob: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ReportParams {
    /// Values in `overrides` win over values in `self`.
    pub fn merge(self, overrides: ReportParams) -> Self {
        Self {
            forecast_blob: present(overrides.forecast_blob).or(present(self.forecast_blob)),
            forecast_csv_blob: present(overrides.forecast_csv_blob)
                .or(present(self.forecast_csv_blob)),
            summary_blob: present(overrides.summary_blob).or(present(self.summary_blob)),
        }
    }

    pub fn into_job(self) -> ReportJob {
        let defaults = ReportJob::default();
        ReportJob {
            forecast_blob: present(self.forecast_blob).unwrap_or(defaults.forecast_blob),
            forecast_csv_blob: present(self.forecast_csv_blob)
                .unwrap_or(defaults.forecast_csv_blob),
            summary_blob: present(self.summary_blob).unwrap_or(defaults.summary_blob),
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_report<S: ObjectStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<ReportParams>,
    form: Result<Form<ReportParams>, FormRejection>,
) -> Result<Json<ReportOutcome>, ReportError> {
    let params = match form {
        Ok(Form(body)) => query.merge(body),
        Err(rejection) => {
            tracing::debug!("No form parameters: {}", rejection);
            query
        }
    };
    let job = params.into_job();

    tracing::info!(
        "Generating report from {}/{} into {}",
        state.config.processed_bucket,
        job.forecast_csv_blob,
        job.summary_blob
    );
    // forecast_blob 目前僅記錄，不參與計算
    tracing::debug!("Ignoring forecast_blob {}", job.forecast_blob);

    match generate_report(state.store.clone(), state.config.clone(), job).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            tracing::error!(
                "❌ Report generation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            Err(e)
        }
    }
}
