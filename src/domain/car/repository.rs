//! Car repository interface

use async_trait::async_trait;

use super::model::{Car, CarId};
use crate::domain::DomainResult;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Car>>;
    async fn find_by_id(&self, id: CarId) -> DomainResult<Option<Car>>;
    /// Insert when `car.id` is `None` (an id is assigned), otherwise overwrite
    /// the stored record with that id. Returns the stored entity.
    async fn save(&self, car: Car) -> DomainResult<Car>;
    async fn delete(&self, id: CarId) -> DomainResult<()>;
}
