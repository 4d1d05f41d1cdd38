use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::bid::application::domain::entities::{Bid, BidParty};
use crate::modules::bid::application::domain::rules::{CancelRejection, PlaceBid, PlacementRejection};
use crate::modules::item::application::domain::entities::Item;

#[derive(Debug, Clone, PartialEq)]
pub struct PreviousLeader {
    pub party: BidParty,
    pub amount_cents: i64,
}

/// A committed placement, with what the follow-up notifications need.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBid {
    pub bid: Bid,
    /// The item as it stands after the placement.
    pub item: Item,
    pub bidder: BidParty,
    pub previous_leader: Option<PreviousLeader>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Placed(PlacedBid),
    Rejected(PlacementRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelledBid {
    pub item_id: Uuid,
    pub new_current_bid_cents: i64,
    pub new_bid_count: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Cancelled(CancelledBid),
    Rejected(CancelRejection),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BidLedgerError {
    /// Lock, serialization or active-bid uniqueness conflict. Nothing was written.
    #[error("Concurrent update: {0}")]
    Conflict(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Write side of bidding. Each call is one transaction holding the item row lock,
/// so the domain rules see a stable item and counters change with the bid rows.
#[async_trait]
pub trait BidLedger: Send + Sync {
    async fn place(
        &self,
        bidder_id: Uuid,
        request: PlaceBid,
        now: DateTime<Utc>,
    ) -> Result<PlacementOutcome, BidLedgerError>;

    async fn cancel(
        &self,
        caller_id: Uuid,
        bid_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CancelOutcome, BidLedgerError>;
}
