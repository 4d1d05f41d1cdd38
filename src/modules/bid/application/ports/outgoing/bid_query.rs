use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::bid::application::domain::entities::Bid;
use crate::modules::item::application::domain::entities::{ItemStatus, TimeLeft};
use crate::shared::api::{PageRequest, PageResult};

#[derive(Debug, Clone, PartialEq)]
pub struct BidderSummary {
    pub id: Uuid,
    pub name: String,
    pub profile_image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BidWithBidder {
    pub bid: Bid,
    pub bidder: BidderSummary,
}

/// The slice of an item shown next to its bids.
#[derive(Debug, Clone, PartialEq)]
pub struct BidItemSummary {
    pub id: Uuid,
    pub name: String,
    pub photo: String,
    pub current_bid_cents: i64,
    pub bid_count: i32,
    pub auction_end_date: DateTime<Utc>,
    pub status: ItemStatus,
}

impl BidItemSummary {
    pub fn is_biddable(&self, now: DateTime<Utc>) -> bool {
        self.status == ItemStatus::Active && self.auction_end_date > now
    }

    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        TimeLeft::until(self.auction_end_date, now)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BidWithItem {
    pub bid: Bid,
    pub item: BidItemSummary,
    /// Loaded only where the listing shows the seller.
    pub seller: Option<BidderSummary>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BidQueryError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait BidQuery: Send + Sync {
    async fn item_summary(&self, item_id: Uuid) -> Result<Option<BidItemSummary>, BidQueryError>;

    async fn user_name(&self, user_id: Uuid) -> Result<Option<String>, BidQueryError>;

    /// Highest amount first, newest first among equal amounts.
    async fn item_bids(
        &self,
        item_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<BidWithBidder>, BidQueryError>;

    /// Newest first.
    async fn item_history(
        &self,
        item_id: Uuid,
        limit: u64,
    ) -> Result<Vec<BidWithBidder>, BidQueryError>;

    async fn count_item_bids(&self, item_id: Uuid) -> Result<u64, BidQueryError>;

    /// Every bid by the user, newest first.
    async fn user_bids(&self, bidder_id: Uuid) -> Result<Vec<BidWithItem>, BidQueryError>;

    /// The user's `active` bids on biddable items, newest first, with sellers.
    async fn winning_bids(
        &self,
        bidder_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<BidWithItem>, BidQueryError>;
}

#[cfg(test)]
pub(crate) fn summary_of(item: &crate::modules::item::application::domain::entities::Item) -> BidItemSummary {
    BidItemSummary {
        id: item.id,
        name: item.name.clone(),
        photo: item.photo.clone(),
        current_bid_cents: item.current_bid_cents,
        bid_count: item.bid_count,
        auction_end_date: item.auction_end_date,
        status: item.status,
    }
}
