pub mod ports;
pub mod services;

pub use ports::{LocationLookup, PriceLookup};
pub use services::CarService;
