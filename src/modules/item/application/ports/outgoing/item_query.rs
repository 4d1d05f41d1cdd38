use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::str::FromStr;
use uuid::Uuid;

use crate::modules::item::application::domain::entities::{Category, Item};
use crate::shared::api::{PageRequest, PageResult};

// ========================= Read models =========================

#[derive(Debug, Clone, PartialEq)]
pub struct SellerSummary {
    pub id: Uuid,
    pub name: String,
    pub profile_image: String,
    pub rating: f64,
    pub member_since: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinnerSummary {
    pub id: Uuid,
    pub name: String,
}

/// An item joined with the public details of the people around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub item: Item,
    pub seller: SellerSummary,
    pub winner: Option<WinnerSummary>,
}

// ========================= Filters =========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemListFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring over name or description.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemSort {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    EndingSoon,
    MostBids,
}

impl ItemSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSort::Newest => "newest",
            ItemSort::Oldest => "oldest",
            ItemSort::PriceLow => "price-low",
            ItemSort::PriceHigh => "price-high",
            ItemSort::EndingSoon => "ending-soon",
            ItemSort::MostBids => "most-bids",
        }
    }
}

impl FromStr for ItemSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(ItemSort::Newest),
            "oldest" => Ok(ItemSort::Oldest),
            "price-low" => Ok(ItemSort::PriceLow),
            "price-high" => Ok(ItemSort::PriceHigh),
            "ending-soon" => Ok(ItemSort::EndingSoon),
            "most-bids" => Ok(ItemSort::MostBids),
            _ => Err(()),
        }
    }
}

// ========================= Errors =========================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ItemQueryError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ========================= Port =========================

/// Read side of the catalogue. Listings only ever contain biddable items.
#[async_trait]
pub trait ItemQuery: Send + Sync {
    async fn list_biddable(
        &self,
        filter: ItemListFilter,
        sort: ItemSort,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<PageResult<ItemView>, ItemQueryError>;

    async fn find_view(&self, item_id: Uuid) -> Result<Option<ItemView>, ItemQueryError>;

    /// Biddable featured items, newest first.
    async fn featured(&self, now: DateTime<Utc>, limit: u64)
        -> Result<Vec<ItemView>, ItemQueryError>;

    /// Biddable items ending within `window`, soonest first.
    async fn ending_soon(
        &self,
        now: DateTime<Utc>,
        window: Duration,
        limit: u64,
    ) -> Result<Vec<ItemView>, ItemQueryError>;
}

#[cfg(test)]
pub(crate) fn view_of(item: Item) -> ItemView {
    ItemView {
        seller: SellerSummary {
            id: item.seller_id,
            name: "Sam Seller".to_string(),
            profile_image: "https://via.placeholder.com/100x100?text=User".to_string(),
            rating: 4.5,
            member_since: item.created_at,
        },
        winner: None,
        item,
    }
}
