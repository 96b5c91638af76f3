pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261016_000001_rotation_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261016_000001_rotation_tables::Migration)]
    }
}
