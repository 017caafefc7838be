//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Car, CarId, CarRepository, DomainError, DomainResult, Manufacturer, ManufacturerRepository,
    RepositoryProvider,
};

/// In-memory storage for development and testing
///
/// Keeps the same contract as the database store: ids are assigned on
/// first save, only coordinates are stored for a location, and the
/// manufacturer catalogue starts with the default makers.
pub struct InMemoryStorage {
    cars: DashMap<CarId, Car>,
    manufacturers: DashMap<i32, Manufacturer>,
    car_counter: AtomicI64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        let storage = Self {
            cars: DashMap::new(),
            manufacturers: DashMap::new(),
            car_counter: AtomicI64::new(1),
        };

        for maker in Manufacturer::defaults() {
            storage.manufacturers.insert(maker.code, maker);
        }

        storage
    }

    fn next_car_id(&self) -> CarId {
        self.car_counter.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn cars(&self) -> &dyn CarRepository {
        self
    }

    fn manufacturers(&self) -> &dyn ManufacturerRepository {
        self
    }
}

#[async_trait]
impl CarRepository for InMemoryStorage {
    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        let mut cars: Vec<Car> = self.cars.iter().map(|e| e.value().clone()).collect();
        cars.sort_by_key(|c| c.id);
        Ok(cars)
    }

    async fn find_by_id(&self, id: CarId) -> DomainResult<Option<Car>> {
        Ok(self.cars.get(&id).map(|c| c.clone()))
    }

    async fn save(&self, car: Car) -> DomainResult<Car> {
        let now = Utc::now();
        let mut record = car.to_record();

        match record.id {
            None => {
                let id = self.next_car_id();
                record.id = Some(id);
                record.created_at = Some(now);
                record.modified_at = Some(now);
                self.cars.insert(id, record.clone());
            }
            Some(id) => {
                let mut entry = self
                    .cars
                    .get_mut(&id)
                    .ok_or_else(|| DomainError::car_not_found(id))?;
                record.created_at = entry.created_at;
                record.modified_at = Some(now);
                *entry = record.clone();
            }
        }

        Ok(record)
    }

    async fn delete(&self, id: CarId) -> DomainResult<()> {
        self.cars
            .remove(&id)
            .ok_or_else(|| DomainError::car_not_found(id))?;
        Ok(())
    }
}

#[async_trait]
impl ManufacturerRepository for InMemoryStorage {
    async fn find_all(&self) -> DomainResult<Vec<Manufacturer>> {
        let mut makers: Vec<Manufacturer> = self
            .manufacturers
            .iter()
            .map(|e| e.value().clone())
            .collect();
        makers.sort_by_key(|m| m.code);
        Ok(makers)
    }

    async fn find_by_code(&self, code: i32) -> DomainResult<Option<Manufacturer>> {
        Ok(self.manufacturers.get(&code).map(|m| m.clone()))
    }

    async fn register(&self, manufacturer: Manufacturer) -> DomainResult<bool> {
        match self.manufacturers.entry(manufacturer.code) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(manufacturer);
                Ok(true)
            }
        }
    }
}
