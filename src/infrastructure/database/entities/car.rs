//! Car entity
//!
//! Address and price are not columns: both are looked up on every read.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// USED or NEW
    pub condition: String,

    pub lat: f64,
    pub lon: f64,

    pub manufacturer_code: i32,

    /// Name as given when the car was saved; the catalogue name may differ
    pub manufacturer_name: String,

    #[sea_orm(nullable)]
    pub model: Option<String>,

    #[sea_orm(nullable)]
    pub body: Option<String>,

    #[sea_orm(nullable)]
    pub engine: Option<String>,

    #[sea_orm(nullable)]
    pub fuel_type: Option<String>,

    #[sea_orm(nullable)]
    pub mileage: Option<i32>,

    #[sea_orm(nullable)]
    pub external_color: Option<String>,

    #[sea_orm(nullable)]
    pub model_year: Option<i32>,

    #[sea_orm(nullable)]
    pub production_year: Option<i32>,

    #[sea_orm(nullable)]
    pub number_of_doors: Option<i32>,

    pub created_at: DateTimeUtc,

    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerCode",
        to = "super::manufacturer::Column::Code"
    )]
    Manufacturer,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
