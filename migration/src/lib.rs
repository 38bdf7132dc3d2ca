pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_catalog;
mod m20250301_000003_create_orders;

pub struct StoreMigrator;

#[async_trait::async_trait]
impl MigratorTrait for StoreMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_catalog::Migration),
            Box::new(m20250301_000003_create_orders::Migration),
        ]
    }
}
