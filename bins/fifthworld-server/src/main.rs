//! fifthworld-server - HTTP server for the community wizard
//!
//! Loads configuration, sets up logging, builds the coastline probe, opens
//! the community database, and serves the wizard routes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fifthworld_core::config::{CoastlineConfig, CoastlineMode, Config};
use fifthworld_core::error::exit_codes;
use fifthworld_geo::{
    CircleOptions, CoastlineIndex, CoastlineProbe, DirShardSource, GeoError, HttpShardSource,
    ShardScanner, ShardSource,
};
use fifthworld_telemetry::{metrics, TelemetryConfig};
use fifthworld_web::{create_router, AppState};
use fifthworld_wizard::{SqliteStore, Wizard, WizardError, WizardLimits};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fifthworld-server")]
#[command(about = "Serve the Fifth World community wizard")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to fifthworld.toml or .config/fifthworld.toml)
    #[arg(short, long, global = true, env = "FIFTHWORLD_CONFIG")]
    config: Option<String>,

    /// Override the listen address
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Validate the configuration and print the effective values
    CheckConfig,

    /// Check one point against the coastline data
    Coastal {
        /// Latitude in decimal degrees or DMS
        #[arg(allow_hyphen_values = true)]
        lat: String,
        /// Longitude in decimal degrees or DMS
        #[arg(allow_hyphen_values = true)]
        lon: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };
    if let Some(bind) = cli.bind {
        config.schema.server.bind = bind;
    }

    let command = cli.command.unwrap_or(Commands::Serve);
    if let Commands::CheckConfig = command {
        match serde_json::to_string_pretty(&config.schema) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(exit_codes::FAILURE);
            }
        }
        std::process::exit(exit_codes::SUCCESS);
    }

    if let Err(e) = fifthworld_telemetry::init_with_config(TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    }) {
        eprintln!("{e:#}");
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(exit_codes::FAILURE);
        }
    };

    let result = runtime.block_on(async {
        match command {
            Commands::Coastal { lat, lon } => run_coastal(&config, &lat, &lon).await,
            Commands::Serve | Commands::CheckConfig => run_server(&config).await,
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %format!("{e:#}"), "Server stopped");
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code_for(&e));
    }
}

/// Storage and coastline failures get their own exit codes.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(wizard) = cause.downcast_ref::<WizardError>() {
            match wizard {
                WizardError::Store(_) | WizardError::Encode(_) => {
                    return exit_codes::STORAGE_ERROR;
                }
                WizardError::Coastline(_) => return exit_codes::COASTLINE_ERROR,
                _ => {}
            }
        }
        if cause.downcast_ref::<GeoError>().is_some() {
            return exit_codes::COASTLINE_ERROR;
        }
    }
    exit_codes::FAILURE
}

async fn run_server(config: &Config) -> Result<()> {
    let schema = &config.schema;
    if let Some(path) = &config.path {
        info!(path = %path, "Loaded configuration");
    }

    let coastline = build_probe(&schema.coastline).await?;
    let store = SqliteStore::open(&schema.database.path)
        .with_context(|| format!("Failed to open database {}", schema.database.path.display()))?;
    let wizard = Wizard::new(Arc::new(store), coastline, WizardLimits::from(&schema.wizard));

    let app = create_router(Arc::new(AppState { wizard }));
    let listener = tokio::net::TcpListener::bind(&schema.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", schema.server.bind))?;
    info!(bind = %schema.server.bind, "Community wizard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shut down");
    Ok(())
}

async fn run_coastal(config: &Config, lat: &str, lon: &str) -> Result<()> {
    use fifthworld_geo::{normalize_str, Axis, Coordinate};

    let latitude = normalize_str(lat, Axis::Latitude)
        .with_context(|| format!("Invalid latitude {lat:?}"))?;
    let longitude = normalize_str(lon, Axis::Longitude)
        .with_context(|| format!("Invalid longitude {lon:?}"))?;

    let probe = build_probe(&config.schema.coastline).await?;
    let coastal = probe.is_coastal(Coordinate::new(latitude, longitude)).await?;
    println!("[{latitude}, {longitude}] coastal: {coastal}");
    Ok(())
}

async fn build_probe(config: &CoastlineConfig) -> Result<Arc<dyn CoastlineProbe>> {
    let source: Arc<dyn ShardSource> = if is_url(&config.source) {
        Arc::new(HttpShardSource::new(config.source.clone(), config.shard_count)?)
    } else {
        Arc::new(DirShardSource::new(&config.source, config.shard_count))
    };
    let circle = CircleOptions::kilometers(config.radius_km).with_points(config.circle_points);

    let probe: Arc<dyn CoastlineProbe> = match config.mode {
        CoastlineMode::Index => {
            let index = CoastlineIndex::load(source.as_ref(), circle)
                .await
                .context("Failed to load coastline shards")?;
            metrics().gauge("coastline.features", index.len() as u64);
            Arc::new(index)
        }
        CoastlineMode::Scan => {
            info!(source = %source.describe(), "Coastline checks will scan shards per request");
            Arc::new(ShardScanner::new(source, circle))
        }
    };
    Ok(probe)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
