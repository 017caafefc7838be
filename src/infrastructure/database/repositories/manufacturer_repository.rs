//! SeaORM implementation of ManufacturerRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::db_err;
use crate::domain::{DomainResult, Manufacturer, ManufacturerRepository};
use crate::infrastructure::database::entities::manufacturer;

pub struct SeaOrmManufacturerRepository {
    db: DatabaseConnection,
}

impl SeaOrmManufacturerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn entity_to_domain(m: manufacturer::Model) -> Manufacturer {
    Manufacturer::new(m.code, m.name)
}

#[async_trait]
impl ManufacturerRepository for SeaOrmManufacturerRepository {
    async fn find_all(&self) -> DomainResult<Vec<Manufacturer>> {
        let models = manufacturer::Entity::find()
            .order_by_asc(manufacturer::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_code(&self, code: i32) -> DomainResult<Option<Manufacturer>> {
        let model = manufacturer::Entity::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn register(&self, m: Manufacturer) -> DomainResult<bool> {
        let model = manufacturer::ActiveModel {
            code: Set(m.code),
            name: Set(m.name.clone()),
        };

        let inserted = manufacturer::Entity::insert(model)
            .on_conflict(
                OnConflict::column(manufacturer::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        if inserted > 0 {
            info!("Manufacturer registered: {} ({})", m.name, m.code);
        } else {
            debug!("Manufacturer {} already known", m.code);
        }
        Ok(inserted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    #[tokio::test]
    async fn migration_seeds_default_makers() {
        let repo = SeaOrmManufacturerRepository::new(test_database().await);
        assert_eq!(repo.find_all().await.unwrap(), Manufacturer::defaults());
    }

    #[tokio::test]
    async fn register_inserts_new_code() {
        let repo = SeaOrmManufacturerRepository::new(test_database().await);
        assert!(repo.register(Manufacturer::new(200, "Tesla")).await.unwrap());

        let found = repo.find_by_code(200).await.unwrap();
        assert_eq!(found, Some(Manufacturer::new(200, "Tesla")));
    }

    #[tokio::test]
    async fn register_keeps_existing_name() {
        let repo = SeaOrmManufacturerRepository::new(test_database().await);
        assert!(!repo.register(Manufacturer::new(102, "Ford Motor")).await.unwrap());

        let found = repo.find_by_code(102).await.unwrap().unwrap();
        assert_eq!(found.name, "Ford");
        assert_eq!(repo.find_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn unknown_code_is_none() {
        let repo = SeaOrmManufacturerRepository::new(test_database().await);
        assert_eq!(repo.find_by_code(999).await.unwrap(), None);
    }
}
