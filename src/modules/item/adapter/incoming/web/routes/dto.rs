use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::item::application::domain::entities::{
    Category, Condition, ItemStatus, TimeLeft,
};
use crate::modules::item::application::domain::validation::ItemInput;
use crate::modules::item::application::ports::outgoing::{ItemView, SellerSummary, WinnerSummary};
use crate::shared::money::cents_to_dollars;

/// Listing fields accepted by create (required ones enforced there) and update.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestDto {
    #[schema(example = "Mini fridge")]
    pub name: Option<String>,
    #[schema(example = "Fits under a dorm desk, works great")]
    pub description: Option<String>,
    /// Dollars, 0.01 to 100000
    #[schema(example = 40.0)]
    pub starting_price: Option<f64>,
    #[schema(example = "Electronics")]
    pub category: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`, at most 30 days ahead
    #[schema(example = "2026-11-01T18:00:00Z")]
    pub auction_end_date: Option<String>,
    pub photo: Option<String>,
    #[schema(example = "like-new")]
    pub condition: Option<String>,
    pub location: Option<String>,
    /// Dollars, defaults to 1.00
    pub min_bid_increment: Option<f64>,
}

impl From<ItemRequestDto> for ItemInput {
    fn from(dto: ItemRequestDto) -> Self {
        ItemInput {
            name: dto.name,
            description: dto.description,
            starting_price: dto.starting_price,
            category: dto.category,
            auction_end_date: dto.auction_end_date,
            photo: dto.photo,
            condition: dto.condition,
            location: dto.location,
            min_bid_increment: dto.min_bid_increment,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerDto {
    pub id: Uuid,
    pub name: String,
    pub profile_image: String,
    pub rating: f64,
    pub member_since: DateTime<Utc>,
}

impl From<&SellerSummary> for SellerDto {
    fn from(seller: &SellerSummary) -> Self {
        SellerDto {
            id: seller.id,
            name: seller.name.clone(),
            profile_image: seller.profile_image.clone(),
            rating: seller.rating,
            member_since: seller.member_since,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WinnerDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&WinnerSummary> for WinnerDto {
    fn from(winner: &WinnerSummary) -> Self {
        WinnerDto {
            id: winner.id,
            name: winner.name.clone(),
        }
    }
}

/// An item as the API presents it. Amounts are dollars.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub starting_price: f64,
    pub current_bid: f64,
    pub bid_count: i32,
    pub min_bid_increment: f64,
    pub minimum_next_bid: f64,
    pub photo: String,
    pub seller: SellerDto,
    pub auction_start_date: DateTime<Utc>,
    pub auction_end_date: DateTime<Utc>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<WinnerDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_bid: Option<f64>,
    pub views: i32,
    pub is_featured: bool,
    pub condition: Condition,
    pub location: String,
    pub time_left: TimeLeft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemResponse {
    pub fn from_view(view: &ItemView, now: DateTime<Utc>) -> Self {
        let item = &view.item;
        ItemResponse {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category,
            starting_price: cents_to_dollars(item.starting_price_cents),
            current_bid: cents_to_dollars(item.current_bid_cents),
            bid_count: item.bid_count,
            min_bid_increment: cents_to_dollars(item.min_bid_increment_cents),
            minimum_next_bid: cents_to_dollars(item.minimum_next_bid_cents()),
            photo: item.photo.clone(),
            seller: SellerDto::from(&view.seller),
            auction_start_date: item.auction_start_date,
            auction_end_date: item.auction_end_date,
            status: item.status,
            winner: view.winner.as_ref().map(WinnerDto::from),
            winning_bid: item.winning_bid_cents.map(cents_to_dollars),
            views: item.views,
            is_featured: item.is_featured,
            condition: item.condition,
            location: item.location.clone(),
            time_left: item.time_left(now),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// `{item}` payload shared by get, create and update.
#[derive(Serialize, ToSchema)]
pub struct ItemEnvelope {
    pub item: ItemResponse,
}
