//! Car assembly service
//!
//! Reads and writes cars through the repository provider and enriches reads
//! with a live price and a reverse-geocoded address. Enrichment is never
//! persisted and never fails a request.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ports::{LocationLookup, PriceLookup};
use crate::domain::{Car, CarId, DomainError, DomainResult, RepositoryProvider};

pub struct CarService {
    repos: Arc<dyn RepositoryProvider>,
    prices: Arc<dyn PriceLookup>,
    locations: Arc<dyn LocationLookup>,
}

impl CarService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        prices: Arc<dyn PriceLookup>,
        locations: Arc<dyn LocationLookup>,
    ) -> Self {
        Self {
            repos,
            prices,
            locations,
        }
    }

    /// All stored cars with their current price. Locations are returned as
    /// stored; only single-car reads resolve an address.
    pub async fn list(&self) -> DomainResult<Vec<Car>> {
        let cars = self.repos.cars().find_all().await?;
        let mut listed = Vec::with_capacity(cars.len());
        for mut car in cars {
            if let Some(id) = car.id {
                car.price = self.prices.get_price(id).await;
            }
            listed.push(car);
        }
        debug!(count = listed.len(), "Listed cars");
        Ok(listed)
    }

    /// The car with its price and the address at its coordinates.
    pub async fn find_by_id(&self, id: CarId) -> DomainResult<Car> {
        let mut car = self.load(id).await?;

        car.price = self.prices.get_price(id).await;

        if let Some(address) = self.locations.get_address(&car.location).await {
            car.location = car.location.with_address(address);
        }

        Ok(car)
    }

    /// Insert a new car (no id) or overwrite an existing one.
    ///
    /// The returned car is the stored entity, without enrichment.
    pub async fn save(&self, car: Car) -> DomainResult<Car> {
        let Some(id) = car.id else {
            self.register_manufacturer(&car).await?;
            let created = self.repos.cars().save(car).await?;
            info!(car_id = ?created.id, "Car created");
            return Ok(created);
        };

        let mut existing = self.load(id).await?;
        self.register_manufacturer(&car).await?;
        existing.apply_update(car);
        let updated = self.repos.cars().save(existing).await?;
        info!(car_id = id, "Car updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: CarId) -> DomainResult<()> {
        self.load(id).await?;
        self.repos.cars().delete(id).await?;
        info!(car_id = id, "Car deleted");
        Ok(())
    }

    /// Unknown codes join the catalogue. Known codes are left as they are;
    /// the car keeps the name it was saved with either way.
    async fn register_manufacturer(&self, car: &Car) -> DomainResult<()> {
        let maker = &car.details.manufacturer;
        if self.repos.manufacturers().register(maker.clone()).await? {
            info!(code = maker.code, name = %maker.name, "Manufacturer added to catalogue");
        }
        Ok(())
    }

    async fn load(&self, id: CarId) -> DomainResult<Car> {
        self.repos
            .cars()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::car_not_found(id))
    }
}
