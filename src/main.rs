//! Vitals: a health-check web service.
//!
//! This is the server entry point. It anchors the process clock, loads
//! configuration from TOML, initializes tracing, sets up the Axum router and
//! starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals::config::{AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER, PORT_ENV_VAR};
use vitals::http::start_server;
use vitals::routes::create_router;
use vitals::state::AppState;
use vitals::uptime::ProcessClock;

/// Vitals: a health-check web service
#[derive(Parser, Debug)]
#[command(name = "vitals", version, about)]
struct Args {
    /// Path to configuration file [default: config/default.toml, optional]
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "vitals=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Port to listen on (overrides PORT and http.port)
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_tracing(filter: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let clock = ProcessClock::start();
    let args = Args::parse();

    // An explicit path must exist; the default one is optional
    let (config, config_found) = match &args.config {
        Some(path) => (AppConfig::load(path)?, true),
        None => match AppConfig::load_optional(DEFAULT_CONFIG_PATH)? {
            Some(config) => (config, true),
            None => (AppConfig::default(), false),
        },
    };

    // Priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format);

    if !config_found {
        tracing::info!(path = DEFAULT_CONFIG_PATH, "No config file, using defaults");
    }

    let port = config
        .http
        .effective_port(args.port, std::env::var(PORT_ENV_VAR).ok().as_deref())?;

    tracing::info!(
        strict_mode = config.build.strict_mode,
        ignore_lint_errors = config.build.ignore_lint_errors,
        ignore_type_errors = config.build.ignore_type_errors,
        unoptimized_images = config.build.unoptimized_images,
        environment_var = %config.health.environment_var,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone(), clock);
    let app = create_router(state);

    start_server(app, &config, port).await?;

    Ok(())
}
