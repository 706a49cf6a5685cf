// Adapters layer: concrete object store backends behind domain::ports::ObjectStore.

pub mod gcs;
pub mod local;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use gcs::GcsObjectStore;
pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;

use crate::config::{ServerConfig, StoreKind};
use crate::core::ObjectStore;
use crate::utils::error::Result;
use std::path::Path;

/// The backend selected by `ServerConfig::store`.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    Gcs(GcsObjectStore),
    Local(LocalObjectStore),
    #[cfg(feature = "s3")]
    S3(S3ObjectStore),
}

impl ConfiguredStore {
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        match config.store {
            StoreKind::Gcs => Ok(Self::Gcs(GcsObjectStore::new(
                &config.gcs_endpoint,
                config.gcs_access_token.clone(),
                config.project_id.clone(),
            )?)),
            StoreKind::Local => Ok(Self::Local(LocalObjectStore::new(&config.local_root))),
            #[cfg(feature = "s3")]
            StoreKind::S3 => Ok(Self::S3(
                S3ObjectStore::from_settings(&config.s3_region, config.s3_endpoint.as_deref())
                    .await,
            )),
            #[cfg(not(feature = "s3"))]
            StoreKind::S3 => Err(crate::utils::error::ReportError::ConfigError {
                message: "this build does not include S3 support (enable the `s3` feature)"
                    .to_string(),
            }),
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Gcs(_) => StoreKind::Gcs,
            Self::Local(_) => StoreKind::Local,
            #[cfg(feature = "s3")]
            Self::S3(_) => StoreKind::S3,
        }
    }
}

impl ObjectStore for ConfiguredStore {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        match self {
            Self::Gcs(store) => store.download(bucket, key, destination).await,
            Self::Local(store) => store.download(bucket, key, destination).await,
            #[cfg(feature = "s3")]
            Self::S3(store) => store.download(bucket, key, destination).await,
        }
    }

    async fn upload(&self, bucket: &str, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        match self {
            Self::Gcs(store) => store.upload(bucket, key, data, content_type).await,
            Self::Local(store) => store.upload(bucket, key, data, content_type).await,
            #[cfg(feature = "s3")]
            Self::S3(store) => store.upload(bucket, key, data, content_type).await,
        }
    }
}
