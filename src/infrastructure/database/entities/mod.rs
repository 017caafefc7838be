//! Database entities module

pub mod car;
pub mod manufacturer;

pub use car::Entity as CarEntity;
pub use manufacturer::Entity as ManufacturerEntity;
