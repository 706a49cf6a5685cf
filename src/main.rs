use clap::Parser;
use forecast_report::utils::{logger, validation::Validate};
use forecast_report::{serve, ConfiguredStore, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // 初始化日誌
    logger::init_logger(&config.log_level, config.json_logs);

    tracing::info!("Starting forecast-report service");
    tracing::debug!(
        "Bind {}:{}, store {:?}, project {:?}",
        config.bind_address,
        config.port,
        config.store,
        config.project_id
    );

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let store = ConfiguredStore::from_config(&config).await?;
    tracing::info!(
        "Using {:?} object store, processed bucket {}",
        store.kind(),
        config.processed_bucket
    );

    serve(config, store).await?;
    Ok(())
}
