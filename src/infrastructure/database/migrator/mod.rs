//! Database migrations module
//!
//! The schema is only ever created through these versioned migrations.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_rooms;
mod m20250101_000002_create_reservations;
mod m20250101_000003_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_rooms::Migration),
            Box::new(m20250101_000002_create_reservations::Migration),
            Box::new(m20250101_000003_create_users::Migration),
        ]
    }
}
