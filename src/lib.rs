//! # Vehicles Service
//!
//! Vehicle catalog: stores car listings and, on every read, attaches a live
//! price from the pricing service and a street address resolved from the
//! car's coordinates.
//!
//! ## Architecture
//!
//! - **domain**: Car and Manufacturer entities, repository traits
//! - **application**: `CarService` and the outbound lookup ports
//! - **infrastructure**: SeaORM and in-memory stores, HTTP lookup clients
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;
