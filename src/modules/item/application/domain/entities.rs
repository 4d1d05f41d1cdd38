use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_PHOTO: &str = "https://via.placeholder.com/300x300?text=No+Image";
pub const DEFAULT_LOCATION: &str = "Not specified";
pub const DEFAULT_MIN_BID_INCREMENT_CENTS: i64 = 100;
pub const MAX_AUCTION_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Sports,
    Books,
    Art,
    Collectibles,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Sports,
        Category::Books,
        Category::Art,
        Category::Collectibles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Home => "Home",
            Category::Sports => "Sports",
            Category::Books => "Books",
            Category::Art => "Art",
            Category::Collectibles => "Collectibles",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Ended,
    Cancelled,
    Sold,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Ended => "ended",
            ItemStatus::Cancelled => "cancelled",
            ItemStatus::Sold => "sold",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ItemStatus::Active),
            "ended" => Ok(ItemStatus::Ended),
            "cancelled" => Ok(ItemStatus::Cancelled),
            "sold" => Ok(ItemStatus::Sold),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like-new",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }
}

impl FromStr for Condition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Condition::New),
            "like-new" => Ok(Condition::LikeNew),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            _ => Err(()),
        }
    }
}

/// Remaining auction time, truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub expired: bool,
}

impl TimeLeft {
    pub fn until(end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = end - now;
        if remaining <= Duration::zero() {
            return TimeLeft {
                days: 0,
                hours: 0,
                minutes: 0,
                expired: true,
            };
        }

        let total_minutes = remaining.num_minutes();
        TimeLeft {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
            expired: false,
        }
    }
}

pub fn minimum_next_bid(current_bid_cents: i64, min_bid_increment_cents: i64) -> i64 {
    current_bid_cents.saturating_add(min_bid_increment_cents)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub starting_price_cents: i64,
    pub current_bid_cents: i64,
    pub bid_count: i32,
    pub min_bid_increment_cents: i64,
    pub photo: String,
    pub seller_id: Uuid,
    pub auction_start_date: DateTime<Utc>,
    pub auction_end_date: DateTime<Utc>,
    pub status: ItemStatus,
    pub winner_id: Option<Uuid>,
    pub winning_bid_cents: Option<i64>,
    pub views: i32,
    pub is_featured: bool,
    pub condition: Condition,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Open for bids: still active and not past its end date.
    pub fn is_biddable(&self, now: DateTime<Utc>) -> bool {
        self.status == ItemStatus::Active && self.auction_end_date > now
    }

    pub fn minimum_next_bid_cents(&self) -> i64 {
        minimum_next_bid(self.current_bid_cents, self.min_bid_increment_cents)
    }

    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        TimeLeft::until(self.auction_end_date, now)
    }
}

#[cfg(test)]
pub(crate) fn sample_item(seller_id: Uuid) -> Item {
    let now = Utc::now();
    Item {
        id: Uuid::new_v4(),
        name: "Calculus textbook".to_string(),
        description: "Stewart 8th edition, lightly highlighted".to_string(),
        category: Category::Books,
        starting_price_cents: 2_000,
        current_bid_cents: 2_000,
        bid_count: 0,
        min_bid_increment_cents: DEFAULT_MIN_BID_INCREMENT_CENTS,
        photo: DEFAULT_PHOTO.to_string(),
        seller_id,
        auction_start_date: now,
        auction_end_date: now + Duration::days(3),
        status: ItemStatus::Active,
        winner_id: None,
        winning_bid_cents: None,
        views: 0,
        is_featured: false,
        condition: Condition::Good,
        location: DEFAULT_LOCATION.to_string(),
        created_at: now,
        updated_at: now,
    }
}
