//! Outreach Console — server-side backend for the Telegram outreach
//! administration console.
//!
//! Main entry point that loads configuration and starts the API server.

use clap::Parser;
use outreach_api::ApiServer;
use outreach_core::config::AppConfig;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "outreach-console")]
#[command(about = "Backend for the Telegram outreach administration console")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "OUTREACH_CONSOLE__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "OUTREACH_CONSOLE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Bind host (overrides config)
    #[arg(long, env = "OUTREACH_CONSOLE__API__HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach_console=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Outreach console starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        monitor = %config.services.keyword_monitor_url,
        search = %config.services.keyword_search_url,
        export = %config.services.member_export_url,
        sessions = %config.services.account_sessions_url,
        "Configuration loaded"
    );

    // Start API server
    let api_server = ApiServer::new(config);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Outreach console is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
