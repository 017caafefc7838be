//! Pricing service CLI
//!
//! ```sh
//! pricing-service --port 8082 --seed 42
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use pricing::{create_router, PriceStore};

/// Vehicle price lookup service.
#[derive(Parser, Debug)]
#[command(name = "pricing-service", version, about)]
struct Cli {
    #[arg(long, env = "PRICING_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PRICING_PORT", default_value_t = 8082)]
    port: u16,

    /// Seed for a reproducible price table.
    #[arg(long, env = "PRICING_SEED")]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let store = Arc::new(PriceStore::generate(cli.seed));
    info!(prices = store.len(), seeded = cli.seed.is_some(), "Price table generated");

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Pricing service listening on http://{}", addr);

    axum::serve(listener, create_router(store))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Pricing service received shutdown signal");
        })
        .await?;

    info!("Pricing service stopped");
    Ok(())
}
