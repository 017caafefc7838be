pub mod cars;
pub mod health;
pub mod manufacturers;
pub mod metrics;
pub mod request_id;
