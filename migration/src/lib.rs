pub use sea_orm_migration::prelude::*;

mod m20250304_105428_create_users_table;
mod m20250910_091502_create_items_table;
mod m20250910_091530_create_bids_table;
mod m20251020_093015_add_settlement_retry_to_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_105428_create_users_table::Migration),
            Box::new(m20250910_091502_create_items_table::Migration),
            Box::new(m20250910_091530_create_bids_table::Migration),
            Box::new(m20251020_093015_add_settlement_retry_to_items::Migration),
        ]
    }
}
