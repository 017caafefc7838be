//! Application services

mod car;

pub use car::CarService;
