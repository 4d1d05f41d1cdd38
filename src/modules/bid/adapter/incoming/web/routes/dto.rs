use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::bid::application::domain::entities::{Bid, BidStatus};
use crate::modules::bid::application::ports::outgoing::{
    BidItemSummary, BidWithBidder, BidWithItem, BidderSummary,
};
use crate::modules::item::application::domain::entities::{ItemStatus, TimeLeft};
use crate::shared::money::cents_to_dollars;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidRequestDto {
    #[schema(example = "0b7f6a3e-5f0c-4a53-9d87-1f3c2b7b9e10")]
    pub item_id: Option<String>,
    /// Dollars
    #[schema(example = 25.0)]
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidderDto {
    pub id: Uuid,
    pub name: String,
    pub profile_image: String,
}

impl From<&BidderSummary> for BidderDto {
    fn from(summary: &BidderSummary) -> Self {
        BidderDto {
            id: summary.id,
            name: summary.name.clone(),
            profile_image: summary.profile_image.clone(),
        }
    }
}

/// A bid as the API presents it. `amount` is dollars.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub bidder_id: Uuid,
    pub amount: f64,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Bid> for BidResponse {
    fn from(bid: &Bid) -> Self {
        BidResponse {
            id: bid.id,
            item_id: bid.item_id,
            bidder_id: bid.bidder_id,
            amount: cents_to_dollars(bid.amount_cents),
            status: bid.status,
            created_at: bid.created_at,
            updated_at: bid.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemBidResponse {
    pub id: Uuid,
    pub amount: f64,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub bidder: BidderDto,
}

impl From<&BidWithBidder> for ItemBidResponse {
    fn from(row: &BidWithBidder) -> Self {
        ItemBidResponse {
            id: row.bid.id,
            amount: cents_to_dollars(row.bid.amount_cents),
            status: row.bid.status,
            created_at: row.bid.created_at,
            bidder: BidderDto::from(&row.bidder),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidItemDto {
    pub id: Uuid,
    pub name: String,
    pub photo: String,
    pub current_bid: f64,
    pub auction_end_date: DateTime<Utc>,
    pub status: ItemStatus,
    /// Present while the item is still open for bids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left: Option<TimeLeft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<BidderDto>,
}

impl BidItemDto {
    fn from_summary(item: &BidItemSummary, time_left: Option<TimeLeft>) -> Self {
        BidItemDto {
            id: item.id,
            name: item.name.clone(),
            photo: item.photo.clone(),
            current_bid: cents_to_dollars(item.current_bid_cents),
            auction_end_date: item.auction_end_date,
            status: item.status,
            time_left,
            seller: None,
        }
    }
}

/// One of the user's own bids, with the item it was placed on.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBidResponse {
    pub id: Uuid,
    pub amount: f64,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub item: BidItemDto,
}

impl UserBidResponse {
    /// `timeLeft` is attached only when the item is still biddable at `now`.
    pub fn from_row(row: &BidWithItem, now: DateTime<Utc>) -> Self {
        let time_left = row
            .item
            .is_biddable(now)
            .then(|| row.item.time_left(now));
        let mut item = BidItemDto::from_summary(&row.item, time_left);
        item.seller = row.seller.as_ref().map(BidderDto::from);

        UserBidResponse {
            id: row.bid.id,
            amount: cents_to_dollars(row.bid.amount_cents),
            status: row.bid.status,
            created_at: row.bid.created_at,
            item,
        }
    }
}
