//! Create cars table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_manufacturers::Manufacturers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cars::Condition).string().not_null())
                    .col(ColumnDef::new(Cars::Lat).double().not_null())
                    .col(ColumnDef::new(Cars::Lon).double().not_null())
                    .col(ColumnDef::new(Cars::ManufacturerCode).integer().not_null())
                    .col(ColumnDef::new(Cars::ManufacturerName).string().not_null())
                    .col(ColumnDef::new(Cars::Model).string())
                    .col(ColumnDef::new(Cars::Body).string())
                    .col(ColumnDef::new(Cars::Engine).string())
                    .col(ColumnDef::new(Cars::FuelType).string())
                    .col(ColumnDef::new(Cars::Mileage).integer())
                    .col(ColumnDef::new(Cars::ExternalColor).string())
                    .col(ColumnDef::new(Cars::ModelYear).integer())
                    .col(ColumnDef::new(Cars::ProductionYear).integer())
                    .col(ColumnDef::new(Cars::NumberOfDoors).integer())
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cars::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_manufacturer")
                            .from(Cars::Table, Cars::ManufacturerCode)
                            .to(Manufacturers::Table, Manufacturers::Code)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_manufacturer")
                    .table(Cars::Table)
                    .col(Cars::ManufacturerCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cars {
    Table,
    Id,
    Condition,
    Lat,
    Lon,
    ManufacturerCode,
    ManufacturerName,
    Model,
    Body,
    Engine,
    FuelType,
    Mileage,
    ExternalColor,
    ModelYear,
    ProductionYear,
    NumberOfDoors,
    CreatedAt,
    ModifiedAt,
}
