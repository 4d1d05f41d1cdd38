use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auction::application::ports::outgoing::{
    SettlementOutcome, SettlementStore, SettlementStoreError, SoldItem,
};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity,
};
use crate::modules::bid::adapter::outgoing::sea_orm_entity::bids::{
    Column as BidColumn, Entity as BidEntity,
};
use crate::modules::bid::application::domain::entities::{BidParty, BidStatus};
use crate::modules::item::adapter::outgoing::sea_orm_entity::items::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as ItemEntity,
};
use crate::modules::item::application::domain::entities::ItemStatus;
use crate::shared::db::{classify_db_err, DbFailure};

/// How long a failed item sits out before the next attempt.
const SETTLEMENT_RETRY_DELAY_MINUTES: i64 = 15;

#[derive(Clone, Debug)]
pub struct AuctionSettlementPostgres {
    db: Arc<DatabaseConnection>,
}

impl AuctionSettlementPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Flips an item out of `active`. Zero rows means someone else settled it first.
async fn close_item(
    txn: &DatabaseTransaction,
    item_id: Uuid,
    changes: ItemActiveModel,
) -> Result<bool, DbErr> {
    let result = ItemEntity::update_many()
        .set(changes)
        .filter(ItemColumn::Id.eq(item_id))
        .filter(ItemColumn::Status.eq(ItemStatus::Active.as_str()))
        .exec(txn)
        .await?;
    Ok(result.rows_affected == 1)
}

async fn settle_in(
    txn: &DatabaseTransaction,
    item_id: Uuid,
    now: DateTime<Utc>,
) -> Result<SettlementOutcome, DbErr> {
    let Some(item) = ItemEntity::find_by_id(item_id)
        .lock_exclusive()
        .one(txn)
        .await?
    else {
        return Ok(SettlementOutcome::Skipped { item_id });
    };
    let item = item.to_domain()?;
    if item.status != ItemStatus::Active || item.auction_end_date > now {
        return Ok(SettlementOutcome::Skipped { item_id });
    }

    // Equal amounts go to whoever bid first
    let top = BidEntity::find()
        .filter(BidColumn::ItemId.eq(item_id))
        .order_by_desc(BidColumn::AmountCents)
        .order_by_asc(BidColumn::CreatedAt)
        .one(txn)
        .await?;

    let Some(top) = top else {
        let closed = close_item(
            txn,
            item_id,
            ItemActiveModel {
                status: Set(ItemStatus::Ended.as_str().to_string()),
                updated_at: Set(now.fixed_offset()),
                ..Default::default()
            },
        )
        .await?;
        return Ok(if closed {
            SettlementOutcome::Ended { item_id }
        } else {
            SettlementOutcome::Skipped { item_id }
        });
    };

    let winner = UserEntity::find_by_id(top.bidder_id)
        .one(txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("winning bidder {}", top.bidder_id)))?;

    let closed = close_item(
        txn,
        item_id,
        ItemActiveModel {
            status: Set(ItemStatus::Sold.as_str().to_string()),
            winner_id: Set(Some(top.bidder_id)),
            winning_bid_cents: Set(Some(top.amount_cents)),
            updated_at: Set(now.fixed_offset()),
            ..Default::default()
        },
    )
    .await?;
    if !closed {
        return Ok(SettlementOutcome::Skipped { item_id });
    }

    BidEntity::update_many()
        .col_expr(BidColumn::Status, Expr::value(BidStatus::Won.as_str()))
        .col_expr(BidColumn::UpdatedAt, Expr::value(now.fixed_offset()))
        .filter(BidColumn::Id.eq(top.id))
        .exec(txn)
        .await?;

    BidEntity::update_many()
        .col_expr(BidColumn::Status, Expr::value(BidStatus::Lost.as_str()))
        .col_expr(BidColumn::UpdatedAt, Expr::value(now.fixed_offset()))
        .filter(BidColumn::ItemId.eq(item_id))
        .filter(BidColumn::Id.ne(top.id))
        .exec(txn)
        .await?;

    UserEntity::update_many()
        .col_expr(UserColumn::ItemsSold, Expr::col(UserColumn::ItemsSold).add(1))
        .col_expr(UserColumn::UpdatedAt, Expr::value(now.fixed_offset()))
        .filter(UserColumn::Id.eq(item.seller_id))
        .exec(txn)
        .await?;

    UserEntity::update_many()
        .col_expr(
            UserColumn::TotalSpentCents,
            Expr::col(UserColumn::TotalSpentCents).add(top.amount_cents),
        )
        .col_expr(UserColumn::UpdatedAt, Expr::value(now.fixed_offset()))
        .filter(UserColumn::Id.eq(top.bidder_id))
        .exec(txn)
        .await?;

    Ok(SettlementOutcome::Sold(SoldItem {
        item_id,
        item_name: item.name,
        winner: BidParty {
            id: winner.id,
            name: winner.name,
            email: winner.email,
            profile_image: winner.profile_image,
        },
        winning_bid_cents: top.amount_cents,
    }))
}

#[async_trait]
impl SettlementStore for AuctionSettlementPostgres {
    async fn due_items(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Uuid>, SettlementStoreError> {
        // Items that keep failing go behind fresh ones so they cannot fill every batch
        let items = ItemEntity::find()
            .filter(ItemColumn::Status.eq(ItemStatus::Active.as_str()))
            .filter(ItemColumn::AuctionEndDate.lte(now.fixed_offset()))
            .filter(
                Condition::any()
                    .add(ItemColumn::SettlementRetryAt.is_null())
                    .add(ItemColumn::SettlementRetryAt.lte(now.fixed_offset())),
            )
            .order_by_asc(ItemColumn::SettlementFailures)
            .order_by_asc(ItemColumn::AuctionEndDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(items.into_iter().map(|item| item.id).collect())
    }

    async fn settle(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SettlementOutcome, SettlementStoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match settle_in(&txn, item_id, now).await {
            Ok(SettlementOutcome::Skipped { item_id }) => {
                txn.rollback().await.map_err(map_db_err)?;
                Ok(SettlementOutcome::Skipped { item_id })
            }
            Ok(outcome) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(outcome)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(map_db_err(e))
            }
        }
    }

    async fn record_failure(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), SettlementStoreError> {
        let retry_at = now + Duration::minutes(SETTLEMENT_RETRY_DELAY_MINUTES);
        ItemEntity::update_many()
            .col_expr(
                ItemColumn::SettlementFailures,
                Expr::col(ItemColumn::SettlementFailures).add(1),
            )
            .col_expr(
                ItemColumn::SettlementRetryAt,
                Expr::value(retry_at.fixed_offset()),
            )
            .filter(ItemColumn::Id.eq(item_id))
            .filter(ItemColumn::Status.eq(ItemStatus::Active.as_str()))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

fn map_db_err(e: DbErr) -> SettlementStoreError {
    match classify_db_err(&e) {
        DbFailure::Unavailable => SettlementStoreError::Unavailable(e.to_string()),
        _ => SettlementStoreError::DatabaseError(e.to_string()),
    }
}
