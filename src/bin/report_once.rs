use clap::Parser;
use forecast_report::domain::model::{DEFAULT_FORECAST_CSV_BLOB, DEFAULT_SUMMARY_BLOB};
use forecast_report::utils::{logger, validation::Validate};
use forecast_report::{generate_report, ConfiguredStore, ReportJob, ServerConfig};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "report-once")]
#[command(about = "Generate one forecast summary without starting the HTTP server")]
struct Args {
    #[command(flatten)]
    config: ServerConfig,

    /// Forecast CSV object inside the processed bucket
    #[arg(long, default_value = DEFAULT_FORECAST_CSV_BLOB)]
    forecast_csv_blob: String,

    /// Destination object for the JSON summary
    #[arg(long, default_value = DEFAULT_SUMMARY_BLOB)]
    summary_blob: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger(&args.config.log_level, args.config.json_logs);
    tracing::info!("🚀 Running a single forecast report");

    if let Err(e) = args.config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let store = ConfiguredStore::from_config(&args.config).await?;
    let job = ReportJob {
        forecast_csv_blob: args.forecast_csv_blob,
        summary_blob: args.summary_blob,
        ..ReportJob::default()
    };

    match generate_report(Arc::new(store), Arc::new(args.config), job).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Report failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }
}
