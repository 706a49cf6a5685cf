use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Object {bucket}/{key} not found")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Object store error: {message}")]
    StoreError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Configuration,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Storage => "storage_error",
            ErrorCategory::Data => "data_error",
            ErrorCategory::Configuration => "configuration_error",
            ErrorCategory::System => "internal_error",
        }
    }
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ObjectNotFound { .. }
            | ReportError::StoreError { .. }
            | ReportError::HttpError(_) => ErrorCategory::Storage,
            ReportError::CsvError(_) | ReportError::SerializationError(_) => ErrorCategory::Data,
            ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Upstream storage failures surface as 502, everything else as 500.
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Storage => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::ObjectNotFound { .. } => {
                "Check that the forecast CSV has been exported to the processed bucket"
            }
            ReportError::StoreError { .. } | ReportError::HttpError(_) => {
                "Check object store credentials and network connectivity"
            }
            ReportError::CsvError(_) => "Check that the forecast file is a UTF-8 CSV with a header row",
            ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => {
                "Review the command line flags and environment variables"
            }
            _ => "Retry the request; if it keeps failing inspect the service logs",
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "status": "error",
            "error": self.category().as_str(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
