//! Infrastructure layer - external concerns

pub mod clients;
pub mod database;
pub mod storage;

pub use clients::{FixedAddressLookup, MapsClient, NoAddressLookup, PricingClient};
pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
pub use storage::InMemoryStorage;
