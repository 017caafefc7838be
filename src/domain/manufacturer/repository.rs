//! Manufacturer repository interface

use async_trait::async_trait;

use super::model::Manufacturer;
use crate::domain::DomainResult;

#[async_trait]
pub trait ManufacturerRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Manufacturer>>;
    async fn find_by_code(&self, code: i32) -> DomainResult<Option<Manufacturer>>;
    /// Add a maker whose code is not in the catalogue yet. Existing codes
    /// keep their name. Returns whether a row was added.
    async fn register(&self, manufacturer: Manufacturer) -> DomainResult<bool>;
}
