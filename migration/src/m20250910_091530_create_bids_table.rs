use sea_orm_migration::prelude::*;

use crate::m20250304_105428_create_users_table::Users;
use crate::m20250910_091502_create_items_table::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bids::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bids::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bids::ItemId).uuid().not_null())
                    .col(ColumnDef::new(Bids::BidderId).uuid().not_null())
                    .col(ColumnDef::new(Bids::AmountCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bids::Status)
                            .string_len(10)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Bids::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bids::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bids_item_id")
                            .from(Bids::Table, Bids::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bids_bidder_id")
                            .from(Bids::Table, Bids::BidderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE bids
                ADD CONSTRAINT chk_bids_status CHECK (
                    status IN ('active', 'outbid', 'winning', 'won', 'lost')
                ),
                ADD CONSTRAINT chk_bids_amount_positive CHECK (amount_cents >= 1);
                "#,
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // At most one leading bid per item
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_bids_one_active_per_item
                ON bids (item_id)
                WHERE status = 'active';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_bids_item_amount
                ON bids (item_id, amount_cents DESC, created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_bids_bidder_created_at
                ON bids (bidder_id, created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_bids_updated_at
                BEFORE UPDATE ON bids
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_bids_updated_at ON bids")
            .await?;

        manager
            .drop_table(Table::drop().table(Bids::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bids {
    Table,
    Id,
    ItemId,
    BidderId,
    AmountCents,
    Status,
    CreatedAt,
    UpdatedAt,
}
