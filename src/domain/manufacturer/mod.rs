//! Manufacturer catalogue

pub mod model;
pub mod repository;

pub use model::Manufacturer;
pub use repository::ManufacturerRepository;
