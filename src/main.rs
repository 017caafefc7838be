//! Vehicles service CLI
//!
//! ```sh
//! # Run with default config (~/.config/vehicles-service/config.toml)
//! vehicles-service
//!
//! # Custom config path
//! vehicles-service --config /etc/vehicles-service/config.toml
//!
//! # In-memory storage on another port
//! vehicles-service --memory --port 8181
//!
//! # Validate config without starting
//! vehicles-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use vehicles::config::{default_config_path, AppConfig, StorageKind};
use vehicles::server::{init_tracing, ServerHandle, ServerOptions};

/// Vehicle catalog REST API with live prices and addresses.
#[derive(Parser, Debug)]
#[command(name = "vehicles-service", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "VEHICLES_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep cars in memory instead of the configured database.
    #[arg(long)]
    memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let file_exists = config_path.exists();

    let loaded = if file_exists {
        AppConfig::load(&config_path)
    } else {
        Ok(AppConfig::default())
    };

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            if file_exists {
                info!("Configuration loaded from {}", config_path.display());
            } else {
                info!("No config file at {}, using defaults", config_path.display());
            }
            cfg
        }
        Err(e) => {
            if cli.check {
                eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
                std::process::exit(1);
            }
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if cli.memory {
        info!("CLI override: storage = memory");
        config.database.storage = StorageKind::Memory;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Storage     : {:?} ({})", config.database.storage, config.database.url);
        println!("   Pricing     : {}", config.clients.pricing_url);
        println!("   Maps        : {:?} ({})", config.clients.maps_mode, config.clients.maps_url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
