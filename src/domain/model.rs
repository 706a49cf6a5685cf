use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_FORECAST_BLOB: &str = "processed/forecast.parquet";
pub const DEFAULT_FORECAST_CSV_BLOB: &str = "processed/forecast.csv";
pub const DEFAULT_SUMMARY_BLOB: &str = "reports/summary.json";

/// One row of the forecast export.
///
/// Columns other than `store_id` and `rev_fcst` are ignored. A missing key
/// becomes the empty string and a missing or unparsable forecast becomes `0.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub store_id: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rev_fcst: f64,
}

impl ForecastRecord {
    pub fn new(store_id: impl Into<String>, rev_fcst: f64) -> Self {
        Self {
            store_id: store_id.into(),
            rev_fcst,
        }
    }
}

/// Parses a forecast cell, coercing anything that is not a finite number to zero.
pub fn parse_forecast_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(parse_forecast_value).unwrap_or(0.0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub grand_total_forecast: f64,
    pub stores: BTreeMap<String, f64>,
}

/// Blob locations for a single report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportJob {
    pub forecast_blob: String,
    pub forecast_csv_blob: String,
    pub summary_blob: String,
}

impl Default for ReportJob {
    fn default() -> Self {
        Self {
            forecast_blob: DEFAULT_FORECAST_BLOB.to_string(),
            forecast_csv_blob: DEFAULT_FORECAST_CSV_BLOB.to_string(),
            summary_blob: DEFAULT_SUMMARY_BLOB.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub status: String,
    pub summary: Summary,
    pub stored_at: String,
}

impl ReportOutcome {
    pub fn ok(summary: Summary, stored_at: String) -> Self {
        Self {
            status: "ok".to_string(),
            summary,
            stored_at,
        }
    }
}
