//! Outbound HTTP clients for the price and location lookups

pub mod http;
pub mod maps;
pub mod pricing;

pub use http::{HttpClient, LookupError};
pub use maps::{FixedAddressLookup, MapsClient, NoAddressLookup};
pub use pricing::{PriceQuote, PricingClient};
