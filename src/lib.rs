pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use crate::adapters::{ConfiguredStore, GcsObjectStore, LocalObjectStore, MemoryObjectStore};
pub use crate::config::{ServerConfig, StoreKind};
pub use crate::core::{
    aggregate::aggregate, engine::ReportEngine, generate_report, pipeline::ReportPipeline,
};
pub use crate::domain::model::{ForecastRecord, ReportJob, ReportOutcome, Summary};
pub use crate::server::{create_router, serve, AppState};
pub use crate::utils::error::{ReportError, Result};
