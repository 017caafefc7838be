//! Create manufacturers table and seed the default catalogue

use sea_orm_migration::prelude::*;

use crate::domain::Manufacturer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Manufacturers::Code)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Manufacturers::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(Manufacturers::Table)
            .columns([Manufacturers::Code, Manufacturers::Name]);
        for maker in Manufacturer::defaults() {
            seed.values([maker.code.into(), maker.name.into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Manufacturers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Manufacturers {
    Table,
    Code,
    Name,
}
