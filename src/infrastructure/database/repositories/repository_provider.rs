//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{CarRepository, ManufacturerRepository, RepositoryProvider};

use super::car_repository::SeaOrmCarRepository;
use super::manufacturer_repository::SeaOrmManufacturerRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.cars().find_by_id(1).await?;
/// let makers = repos.manufacturers().find_all().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cars: SeaOrmCarRepository,
    manufacturers: SeaOrmManufacturerRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cars: SeaOrmCarRepository::new(db.clone()),
            manufacturers: SeaOrmManufacturerRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn manufacturers(&self) -> &dyn ManufacturerRepository {
        &self.manufacturers
    }
}
