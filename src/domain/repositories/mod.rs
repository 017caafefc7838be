//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::car::CarRepository;
use super::manufacturer::ManufacturerRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Implemented by the in-memory store and by the SeaORM provider, so
/// services never know which backing store they run against:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let car = repos.cars().find_by_id(1).await?;
///     let makers = repos.manufacturers().find_all().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn cars(&self) -> &dyn CarRepository;
    fn manufacturers(&self) -> &dyn ManufacturerRepository;
}
