use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::bids::{ActiveModel as BidActiveModel, Column as BidColumn, Entity as BidEntity};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::modules::bid::application::domain::entities::{Bid, BidParty, BidStatus};
use crate::modules::bid::application::domain::rules::{
    check_cancellation, check_placement, successor, CancelRejection, PlaceBid, PlacementRejection,
};
use crate::modules::bid::application::ports::outgoing::{
    BidLedger, BidLedgerError, CancelOutcome, CancelledBid, PlacedBid, PlacementOutcome,
    PreviousLeader,
};
use crate::modules::item::adapter::outgoing::sea_orm_entity::items::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as ItemEntity,
};
use crate::shared::db::{classify_db_err, DbFailure};

/// Bid writes, each in one transaction that holds `FOR UPDATE` on the item row.
#[derive(Clone, Debug)]
pub struct BidLedgerPostgres {
    db: Arc<DatabaseConnection>,
}

impl BidLedgerPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn party(user: UserModel) -> BidParty {
    BidParty {
        id: user.id,
        name: user.name,
        email: user.email,
        profile_image: user.profile_image,
    }
}

async fn place_in(
    txn: &DatabaseTransaction,
    bidder_id: Uuid,
    request: PlaceBid,
    now: DateTime<Utc>,
) -> Result<PlacementOutcome, DbErr> {
    let Some(item) = ItemEntity::find_by_id(request.item_id)
        .lock_exclusive()
        .one(txn)
        .await?
    else {
        return Ok(PlacementOutcome::Rejected(PlacementRejection::ItemNotFound));
    };
    let item = item.to_domain()?;

    let bidder = UserEntity::find_by_id(bidder_id).one(txn).await?;
    if let Err(rejection) =
        check_placement(&item, bidder.is_some(), bidder_id, request.amount_cents, now)
    {
        return Ok(PlacementOutcome::Rejected(rejection));
    }
    let Some(bidder) = bidder else {
        return Ok(PlacementOutcome::Rejected(PlacementRejection::BidderNotFound));
    };

    let leader = BidEntity::find()
        .filter(BidColumn::ItemId.eq(item.id))
        .filter(BidColumn::Status.eq(BidStatus::Active.as_str()))
        .one(txn)
        .await?;
    let previous_leader = match leader {
        Some(leader) => UserEntity::find_by_id(leader.bidder_id)
            .one(txn)
            .await?
            .map(|user| PreviousLeader {
                party: party(user),
                amount_cents: leader.amount_cents,
            }),
        None => None,
    };

    BidEntity::update_many()
        .col_expr(BidColumn::Status, Expr::value(BidStatus::Outbid.as_str()))
        .col_expr(BidColumn::UpdatedAt, Expr::value(now.fixed_offset()))
        .filter(BidColumn::ItemId.eq(item.id))
        .filter(BidColumn::Status.eq(BidStatus::Active.as_str()))
        .exec(txn)
        .await?;

    let earlier_bids = BidEntity::find()
        .filter(BidColumn::ItemId.eq(item.id))
        .filter(BidColumn::BidderId.eq(bidder_id))
        .count(txn)
        .await?;

    let bid = BidActiveModel {
        id: Set(Uuid::new_v4()),
        item_id: Set(item.id),
        bidder_id: Set(bidder_id),
        amount_cents: Set(request.amount_cents),
        status: Set(BidStatus::Active.as_str().to_string()),
        created_at: Set(now.fixed_offset()),
        updated_at: Set(now.fixed_offset()),
    }
    .insert(txn)
    .await?
    .to_domain()?;

    let updated = ItemEntity::update_many()
        .col_expr(ItemColumn::CurrentBidCents, Expr::value(request.amount_cents))
        .col_expr(ItemColumn::BidCount, Expr::col(ItemColumn::BidCount).add(1))
        .col_expr(ItemColumn::UpdatedAt, Expr::value(now.fixed_offset()))
        .filter(ItemColumn::Id.eq(item.id))
        .exec_with_returning(txn)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DbErr::RecordNotFound(format!("item {} vanished under lock", item.id)))?
        .to_domain()?;

    if earlier_bids == 0 {
        UserEntity::update_many()
            .col_expr(
                UserColumn::SuccessfulBids,
                Expr::col(UserColumn::SuccessfulBids).add(1),
            )
            .filter(UserColumn::Id.eq(bidder_id))
            .exec(txn)
            .await?;
    }

    Ok(PlacementOutcome::Placed(PlacedBid {
        bid,
        item: updated,
        bidder: party(bidder),
        previous_leader,
    }))
}

async fn cancel_in(
    txn: &DatabaseTransaction,
    caller_id: Uuid,
    bid_id: Uuid,
    now: DateTime<Utc>,
) -> Result<CancelOutcome, DbErr> {
    let Some(located) = BidEntity::find_by_id(bid_id).one(txn).await? else {
        return Ok(CancelOutcome::Rejected(CancelRejection::BidNotFound));
    };

    let Some(item) = ItemEntity::find_by_id(located.item_id)
        .lock_exclusive()
        .one(txn)
        .await?
    else {
        return Ok(CancelOutcome::Rejected(CancelRejection::BidNotFound));
    };

    // Re-read under the lock; a concurrent placement may have outbid it
    let Some(bid) = BidEntity::find_by_id(bid_id).one(txn).await? else {
        return Ok(CancelOutcome::Rejected(CancelRejection::BidNotFound));
    };
    let bid = bid.to_domain()?;

    if let Err(rejection) = check_cancellation(&bid, caller_id, now) {
        return Ok(CancelOutcome::Rejected(rejection));
    }

    BidEntity::delete_by_id(bid_id).exec(txn).await?;

    let others = BidEntity::find()
        .filter(BidColumn::ItemId.eq(bid.item_id))
        .all(txn)
        .await?
        .into_iter()
        .map(|model| model.to_domain())
        .collect::<Result<Vec<Bid>, DbErr>>()?;
    let next = successor(&bid, &others);

    if let Some(next) = next {
        BidEntity::update_many()
            .col_expr(BidColumn::Status, Expr::value(BidStatus::Active.as_str()))
            .col_expr(BidColumn::UpdatedAt, Expr::value(now.fixed_offset()))
            .filter(BidColumn::Id.eq(next.id))
            .exec(txn)
            .await?;
    }

    let new_current_bid_cents = next.map_or(item.starting_price_cents, |b| b.amount_cents);
    let new_bid_count = (item.bid_count - 1).max(0);

    ItemEntity::update_many()
        .set(ItemActiveModel {
            current_bid_cents: Set(new_current_bid_cents),
            bid_count: Set(new_bid_count),
            updated_at: Set(now.fixed_offset()),
            ..Default::default()
        })
        .filter(ItemColumn::Id.eq(item.id))
        .exec(txn)
        .await?;

    Ok(CancelOutcome::Cancelled(CancelledBid {
        item_id: item.id,
        new_current_bid_cents,
        new_bid_count,
    }))
}

/// Commits only when the work produced a state change; rejections roll back.
async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, DbErr>,
    applied: impl Fn(&T) -> bool,
) -> Result<T, BidLedgerError> {
    match result {
        Ok(outcome) if applied(&outcome) => {
            txn.commit().await.map_err(map_db_err)?;
            Ok(outcome)
        }
        Ok(outcome) => {
            txn.rollback().await.map_err(map_db_err)?;
            Ok(outcome)
        }
        Err(e) => {
            let _ = txn.rollback().await;
            Err(map_db_err(e))
        }
    }
}

#[async_trait]
impl BidLedger for BidLedgerPostgres {
    async fn place(
        &self,
        bidder_id: Uuid,
        request: PlaceBid,
        now: DateTime<Utc>,
    ) -> Result<PlacementOutcome, BidLedgerError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = place_in(&txn, bidder_id, request, now).await;
        finish(txn, result, |outcome| matches!(outcome, PlacementOutcome::Placed(_))).await
    }

    async fn cancel(
        &self,
        caller_id: Uuid,
        bid_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CancelOutcome, BidLedgerError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = cancel_in(&txn, caller_id, bid_id, now).await;
        finish(txn, result, |outcome| matches!(outcome, CancelOutcome::Cancelled(_))).await
    }
}

fn map_db_err(e: DbErr) -> BidLedgerError {
    match classify_db_err(&e) {
        // A second active bid trips the partial unique index: another writer won
        DbFailure::Contention | DbFailure::UniqueViolation => BidLedgerError::Conflict(e.to_string()),
        DbFailure::Unavailable => BidLedgerError::Unavailable(e.to_string()),
        DbFailure::Other => BidLedgerError::DatabaseError(e.to_string()),
    }
}
