//! Outbound ports: lookups against systems that own price and address data
//!
//! Both lookups are best-effort: a failing or unreachable collaborator is
//! reported as `None`, never as an error. Implementations log the cause.
//!
//! Production implementations live in
//! [`infrastructure::clients`](crate::infrastructure::clients).

use async_trait::async_trait;

use crate::domain::{Address, CarId, Location};

/// Price lookup for a single vehicle
#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Display price such as `"USD 1234.56"`, or `None` when no price is known
    /// or the pricing service could not be reached.
    async fn get_price(&self, vehicle_id: CarId) -> Option<String>;
}

/// Reverse-geocoding lookup
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Postal address at the given coordinates, or `None` when the lookup
    /// failed or found nothing.
    async fn get_address(&self, location: &Location) -> Option<Address>;
}
