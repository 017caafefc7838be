pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./vehicles.db?mode=rwc")
    pub url: String,
    /// Pool size override. In-memory SQLite must use a single connection,
    /// every new connection opens a fresh empty database.
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite("./vehicles.db")
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            max_connections: None,
        }
    }

    /// Private in-memory SQLite database
    pub fn memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let max_connections = url.contains(":memory:").then_some(1);
        Self { url, max_connections }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging_level(log::LevelFilter::Debug);
    if let Some(max) = config.max_connections {
        options.max_connections(max).min_connections(max);
    }

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply all pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_database() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::memory()).await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_url_forces_single_connection() {
        assert_eq!(DatabaseConfig::from_url("sqlite::memory:").max_connections, Some(1));
        assert_eq!(DatabaseConfig::from_url("sqlite://./x.db?mode=rwc").max_connections, None);
    }

    #[test]
    fn sqlite_path_creates_file_on_demand() {
        assert_eq!(
            DatabaseConfig::sqlite("/tmp/cars.db").url,
            "sqlite:///tmp/cars.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_database().await;
        run_migrations(&db).await.unwrap();
    }
}
