//! SeaORM implementation of CarRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    Car, CarId, CarRepository, Condition, Details, DomainError, DomainResult, Location,
    Manufacturer,
};
use crate::infrastructure::database::entities::car;

pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: car::Model) -> DomainResult<Car> {
    let manufacturer = Manufacturer::new(m.manufacturer_code, m.manufacturer_name);

    Ok(Car {
        id: Some(m.id),
        condition: m.condition.parse::<Condition>()?,
        location: Location::new(m.lat, m.lon),
        details: Details {
            manufacturer,
            model: m.model,
            body: m.body,
            engine: m.engine,
            fuel_type: m.fuel_type,
            mileage: m.mileage,
            external_color: m.external_color,
            model_year: m.model_year,
            production_year: m.production_year,
            number_of_doors: m.number_of_doors,
        },
        price: None,
        created_at: Some(m.created_at),
        modified_at: Some(m.modified_at),
    })
}

fn domain_to_active(c: &Car) -> car::ActiveModel {
    let d = &c.details;
    car::ActiveModel {
        id: NotSet,
        condition: Set(c.condition.to_string()),
        lat: Set(c.location.lat),
        lon: Set(c.location.lon),
        manufacturer_code: Set(d.manufacturer.code),
        manufacturer_name: Set(d.manufacturer.name.clone()),
        model: Set(d.model.clone()),
        body: Set(d.body.clone()),
        engine: Set(d.engine.clone()),
        fuel_type: Set(d.fuel_type.clone()),
        mileage: Set(d.mileage),
        external_color: Set(d.external_color.clone()),
        model_year: Set(d.model_year),
        production_year: Set(d.production_year),
        number_of_doors: Set(d.number_of_doors),
        created_at: NotSet,
        modified_at: NotSet,
    }
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        let rows = car::Entity::find()
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(entity_to_domain).collect()
    }

    async fn find_by_id(&self, id: CarId) -> DomainResult<Option<Car>> {
        let row = car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        row.map(entity_to_domain).transpose()
    }

    async fn save(&self, c: Car) -> DomainResult<Car> {
        let now = Utc::now();
        let mut model = domain_to_active(&c);
        model.modified_at = Set(now);

        let stored = match c.id {
            None => {
                model.created_at = Set(now);
                let result = model.insert(&self.db).await.map_err(db_err)?;
                info!("Car saved: {} ({})", c.details.manufacturer.name, result.id);
                result
            }
            Some(id) => {
                let existing = car::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(db_err)?
                    .ok_or_else(|| DomainError::car_not_found(id))?;

                model.id = Set(id);
                model.created_at = Set(existing.created_at);
                let result = model.update(&self.db).await.map_err(db_err)?;
                debug!("Car updated: {}", id);
                result
            }
        };

        entity_to_domain(stored)
    }

    async fn delete(&self, id: CarId) -> DomainResult<()> {
        let result = car::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::car_not_found(id));
        }
        info!("Car deleted: {}", id);
        Ok(())
    }
}
