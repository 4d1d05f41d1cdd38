use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::bid::application::domain::entities::BidParty;

#[derive(Debug, Clone, PartialEq)]
pub struct SoldItem {
    pub item_id: Uuid,
    pub item_name: String,
    pub winner: BidParty,
    pub winning_bid_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    Sold(SoldItem),
    /// Closed without any bids.
    Ended { item_id: Uuid },
    /// Already settled by another tick or instance, or no longer due.
    Skipped { item_id: Uuid },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SettlementStoreError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Active items whose end date has passed and that are not waiting out a failed
    /// attempt. Items with fewer failures come first, then the oldest.
    async fn due_items(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Uuid>, SettlementStoreError>;

    /// Closes one auction in its own transaction. Only an item still `active` is touched.
    async fn settle(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SettlementOutcome, SettlementStoreError>;

    /// Counts a failed attempt and holds the item back for a while.
    async fn record_failure(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), SettlementStoreError>;
}
