pub mod car;
pub mod manufacturer;
pub mod repositories;

// Re-export commonly used types
pub use car::{Address, Car, CarId, CarRepository, Condition, Details, Location};
pub use manufacturer::{Manufacturer, ManufacturerRepository};
pub use repositories::{DomainResult, RepositoryProvider};

pub use crate::shared::errors::DomainError;
