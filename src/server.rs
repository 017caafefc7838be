//! Reusable vehicles-service runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, storage
//! (SQLite with migrations, or in-memory), lookup clients, REST API and
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{CarService, LocationLookup, PriceLookup};
use crate::config::{AppConfig, ClientsConfig, MapsMode, StorageKind};
use crate::domain::RepositoryProvider;
use crate::infrastructure::{
    init_database, run_migrations, DatabaseConfig, FixedAddressLookup, InMemoryStorage,
    MapsClient, NoAddressLookup, PricingClient, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::create_api_router;
use crate::interfaces::http::modules::health::LookupSettings;
use crate::interfaces::http::modules::metrics::describe_metrics;
use crate::shared::errors::InfraError;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the vehicles service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running vehicles service.
///
/// ```rust,no_run
/// use vehicles::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub car_service: Arc<CarService>,
    pub config: AppConfig,
    /// Address the API is actually bound to
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting vehicles service...");

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            match app_cfg.database.storage {
                StorageKind::Memory => {
                    info!("Storage: in-memory");
                    (Arc::new(InMemoryStorage::new()), None)
                }
                StorageKind::Sqlite => {
                    let db = init_database(&DatabaseConfig::from_url(&app_cfg.database.url)).await?;
                    if opts.auto_migrate {
                        run_migrations(&db).await?;
                    }
                    (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
                }
            };

        // ── Lookups & service ──────────────────────────────────
        let (prices, locations) = build_lookups(&app_cfg.clients)?;
        let car_service = Arc::new(CarService::new(repos.clone(), prices, locations));

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_router = create_api_router(
            car_service.clone(),
            repos.clone(),
            LookupSettings::from(&app_cfg.clients),
            prometheus_handle,
        );

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            car_service,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the shutdown signal, then for in-flight requests to drain
    /// (bounded by `server.shutdown_timeout`), then close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Some requests were still running at shutdown");
        }

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Vehicles service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down vehicles service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global metrics recorder can only be installed once per process;
/// later calls reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Some(handle.clone());
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            describe_metrics();
            info!("Prometheus metrics recorder installed");
            Some(PROM_HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!("Metrics disabled, recorder could not be installed: {}", e);
            None
        }
    }
}

/// Price and location lookups as configured.
pub fn build_lookups(
    clients: &ClientsConfig,
) -> Result<(Arc<dyn PriceLookup>, Arc<dyn LocationLookup>), InfraError> {
    let prices: Arc<dyn PriceLookup> =
        Arc::new(PricingClient::new(&clients.pricing_url, clients.timeout_ms)?);
    info!("Pricing service: {}", clients.pricing_url);

    let locations: Arc<dyn LocationLookup> = match clients.maps_mode {
        MapsMode::Http => {
            info!("Maps service: {}", clients.maps_url);
            Arc::new(MapsClient::new(&clients.maps_url, clients.timeout_ms)?)
        }
        MapsMode::Static => {
            info!("Maps service: static address");
            Arc::new(FixedAddressLookup::default())
        }
        MapsMode::Disabled => {
            info!("Maps service: disabled");
            Arc::new(NoAddressLookup)
        }
    };

    Ok((prices, locations))
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` wins over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
