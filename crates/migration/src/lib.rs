//! Migrator for the car inventory schema.
//! Indexes are applied after the table they cover.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_cars;
mod m20240301_000002_add_car_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_cars::Migration),
            Box::new(m20240301_000002_add_car_indexes::Migration),
        ]
    }
}
