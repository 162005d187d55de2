pub use sea_orm_migration::prelude::*;

mod m20250110_000001_create_posts;
mod m20250110_000002_create_reservations;
mod m20250110_000003_create_userinfo;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_posts::Migration),
            Box::new(m20250110_000002_create_reservations::Migration),
            Box::new(m20250110_000003_create_userinfo::Migration),
        ]
    }
}
