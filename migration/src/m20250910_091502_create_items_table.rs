use sea_orm_migration::prelude::*;

use crate::m20250304_105428_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create items table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Items::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Items::Description).string_len(500).not_null())
                    .col(
                        ColumnDef::new(Items::Category)
                            .string_len(20)
                            .not_null()
                            .default("Home"),
                    )
                    .col(
                        ColumnDef::new(Items::StartingPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::CurrentBidCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::BidCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Items::MinBidIncrementCents)
                            .big_integer()
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(Items::Photo)
                            .text()
                            .not_null()
                            .default("https://via.placeholder.com/300x300?text=No+Image"),
                    )
                    .col(ColumnDef::new(Items::SellerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Items::AuctionStartDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Items::AuctionEndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::Status)
                            .string_len(12)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Items::WinnerId).uuid().null())
                    .col(ColumnDef::new(Items::WinningBidCents).big_integer().null())
                    .col(
                        ColumnDef::new(Items::Views)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Items::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Items::Condition)
                            .string_len(10)
                            .not_null()
                            .default("good"),
                    )
                    .col(
                        ColumnDef::new(Items::Location)
                            .string_len(100)
                            .not_null()
                            .default("Not specified"),
                    )
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Items::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_seller_id")
                            .from(Items::Table, Items::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_winner_id")
                            .from(Items::Table, Items::WinnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Constraints
        // =====================================================

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE items
                ADD CONSTRAINT chk_items_category CHECK (
                    category IN ('Electronics', 'Fashion', 'Home', 'Sports', 'Books', 'Art', 'Collectibles')
                ),
                ADD CONSTRAINT chk_items_status CHECK (
                    status IN ('active', 'ended', 'cancelled', 'sold')
                ),
                ADD CONSTRAINT chk_items_condition CHECK (
                    condition IN ('new', 'like-new', 'good', 'fair', 'poor')
                ),
                ADD CONSTRAINT chk_items_prices CHECK (
                    starting_price_cents >= 1
                    AND current_bid_cents >= starting_price_cents
                    AND min_bid_increment_cents >= 1
                ),
                ADD CONSTRAINT chk_items_counters CHECK (bid_count >= 0 AND views >= 0);
                "#,
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // Listing: biddable items filtered by category, ordered by end date
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_items_active_end_date
                ON items (auction_end_date)
                WHERE status = 'active';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_items_category_created_at
                ON items (category, created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_items_seller_id
                ON items (seller_id);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_items_featured
                ON items (created_at DESC)
                WHERE is_featured = true AND status = 'active';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_items_updated_at
                BEFORE UPDATE ON items
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
            .execute_unprepared("DROP TRIGGER IF EXISTS update_items_updated_at ON items")
            .await?;

        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Items {
    Table,
    Id,
    Name,
    Description,
    Category,
    StartingPriceCents,
    CurrentBidCents,
    BidCount,
    MinBidIncrementCents,
    Photo,
    SellerId,
    AuctionStartDate,
    AuctionEndDate,
    Status,
    WinnerId,
    WinningBidCents,
    Views,
    IsFeatured,
    Condition,
    Location,
    CreatedAt,
    UpdatedAt,
}
