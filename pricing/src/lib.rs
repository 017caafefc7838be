//! # Pricing Service
//!
//! Serves a price per vehicle id as HAL JSON. Prices are generated at
//! startup and kept in memory.

pub mod domain;
pub mod error;
pub mod hal;
pub mod router;
pub mod store;

pub use domain::Price;
pub use error::PricingError;
pub use router::create_router;
pub use store::PriceStore;
