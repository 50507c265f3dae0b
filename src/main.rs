use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::yahoo::YahooClient;
use config::ChartConfig;
use services::ChartGenerator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quartile_chart=info,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = ChartConfig::default();
    info!("Generating {} chart into {}", config.instrument, config.output_dir.display());

    let generator = ChartGenerator::new(YahooClient::new(), config);
    match generator.generate().await {
        Ok(artifact) => {
            println!("Saved {}", artifact.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Chart generation failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
