use crate::adapters::gcs::DEFAULT_GCS_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bucket_name, validate_non_empty_string, validate_path, validate_range,
    validate_s3_bucket_name, validate_url, Validate,
};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Google Cloud Storage JSON API
    Gcs,
    /// Directory tree on the local filesystem
    Local,
    /// S3-compatible storage (requires the `s3` feature)
    S3,
}

/// Process configuration. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "forecast-report")]
#[command(about = "Aggregates forecast CSVs from object storage into JSON summaries")]
pub struct ServerConfig {
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    #[arg(long, env = "PORT", default_value_t = 4567)]
    pub port: u16,

    #[arg(long, env = "GCP_PROJECT_ID")]
    pub project_id: Option<String>,

    #[arg(long, env = "GCS_BUCKET_PROCESSED")]
    pub processed_bucket: String,

    #[arg(long, env = "OBJECT_STORE", value_enum, default_value_t = StoreKind::Gcs)]
    pub store: StoreKind,

    #[arg(long, env = "LOCAL_STORE_ROOT", default_value = "./data")]
    pub local_root: String,

    #[arg(long, env = "GCS_ENDPOINT", default_value = DEFAULT_GCS_ENDPOINT)]
    pub gcs_endpoint: String,

    #[arg(long, env = "GCS_ACCESS_TOKEN", hide_env_values = true)]
    pub gcs_access_token: Option<String>,

    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    pub s3_region: String,

    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ServerConfig {
    /// Configuration with defaults for everything except the bucket.
    pub fn for_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 4567,
            project_id: None,
            processed_bucket: bucket.into(),
            store: StoreKind::Gcs,
            local_root: "./data".to_string(),
            gcs_endpoint: DEFAULT_GCS_ENDPOINT.to_string(),
            gcs_access_token: None,
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| crate::utils::error::ReportError::InvalidConfigValueError {
                field: "bind_address".to_string(),
                value: self.bind_address.clone(),
                reason: format!("Invalid socket address: {}", e),
            })
    }
}

impl ConfigProvider for ServerConfig {
    fn processed_bucket(&self) -> &str {
        &self.processed_bucket
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        match self.store {
            StoreKind::S3 => validate_s3_bucket_name("processed_bucket", &self.processed_bucket)?,
            StoreKind::Gcs | StoreKind::Local => {
                validate_bucket_name("processed_bucket", &self.processed_bucket)?
            }
        }
        validate_range("port", self.port, 1, u16::MAX)?;
        self.socket_addr()?;
        validate_non_empty_string("log_level", &self.log_level)?;

        match self.store {
            StoreKind::Gcs => validate_url("gcs_endpoint", &self.gcs_endpoint)?,
            StoreKind::Local => validate_path("local_root", &self.local_root)?,
            StoreKind::S3 => {
                validate_non_empty_string("s3_region", &self.s3_region)?;
                if let Some(endpoint) = &self.s3_endpoint {
                    validate_url("s3_endpoint", endpoint)?;
                }
            }
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}
