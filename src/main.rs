use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use nepal_itinerary::{AppConfig, AppState, AzureChatClient, TripPlanner, telemetry, web};

/// Personalised Nepal travel itineraries from a hosted language model
#[derive(Debug, Parser)]
#[command(name = "nepal-itinerary", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "ITINERARY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_path(cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    telemetry::init(&config.logging)?;

    let client = AzureChatClient::new(&config.llm).context("Failed to create language model client")?;
    tracing::info!(
        deployment = %config.llm.deployment,
        api_version = %config.llm.api_version,
        "Language model client ready"
    );

    let state = AppState {
        planner: Arc::new(TripPlanner::new(Arc::new(client))),
    };
    let app = web::router(state, &config.server.static_dir);

    web::run(&config.bind_address(), app).await
}
