use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20260101_000001_create_users;
mod m20260101_000002_create_girls;
mod m20260101_000003_create_detail_images;
mod m20260101_000004_create_reviews;
mod m20260101_000005_create_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_users::Migration),
            Box::new(m20260101_000002_create_girls::Migration),
            Box::new(m20260101_000003_create_detail_images::Migration),
            Box::new(m20260101_000004_create_reviews::Migration),
            Box::new(m20260101_000005_create_settings::Migration),
        ]
    }
}
