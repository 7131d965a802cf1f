//! Roster server - control and display screens for personnel lookup.

use anyhow::Result;
use clap::Parser;
use roster_server::{config, logging, routes, state};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use config::Config;
use logging::{LogConfig, LogFormat, LogPreset};
use state::AppState;

/// Roster server - look up personnel and mirror results to audience screens.
#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(about = "HTTP/WebSocket server for the personnel roster presenter")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Load this workbook into the control session at startup
    #[arg(short, long, value_name = "FILE")]
    workbook: Option<PathBuf>,

    /// Enable verbose logging (every sync publish)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging (TRACE level for everything)
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "sync=debug").
    /// Can be specified multiple times. Targets are prefixed with "roster::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let preset = LogPreset::from_flags(cli.verbose, cli.debug, cli.trace, cli.quiet);
    let log_config = LogConfig::new(preset, cli.log_format).with_overrides(&cli.log_overrides);
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!(
        target: "roster::startup",
        "Loaded configuration (port: {}, topic: '{}')",
        config.port,
        config.topic
    );

    let state = Arc::new(AppState::new(config.clone()));

    if let Some(path) = &cli.workbook {
        let mut session = state.session.lock().await;
        if let Some(summary) = session.upload_file(path)? {
            tracing::info!(
                target: "roster::startup",
                "Preloaded {}: {} units, {} employees ({} rows skipped)",
                path.display(),
                summary.units,
                summary.employees,
                summary.skipped_rows
            );
        }
    }

    let app = routes::router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(target: "roster::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
