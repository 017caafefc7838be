//! Car aggregate
//!
//! Contains the Car entity, its value objects, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Address, Car, CarId, Condition, Details, Location};
pub use repository::CarRepository;
