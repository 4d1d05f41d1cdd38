use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::bid::application::ports::outgoing::{
    BidItemSummary, BidQueryError, BidWithBidder, BidWithItem,
};
use crate::shared::api::{PageRequest, PageResult};
use crate::shared::validation::{FieldError, Violations};

pub const ITEM_BIDS_DEFAULT_LIMIT: u32 = 10;
pub const HISTORY_DEFAULT_LIMIT: u32 = 20;

fn parse_positive(
    v: &mut Violations,
    field: &str,
    message: &str,
    raw: Option<&str>,
    default: u32,
    max: u32,
) -> u32 {
    match raw.map(str::trim) {
        None | Some("") => default,
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if (1..=max).contains(&n) => n,
            _ => {
                v.push_with_value(field, message, raw);
                default
            }
        },
    }
}

/// `page` and `limit` from a query string, with the caller's default page size.
pub fn parse_bid_page(
    page: Option<&str>,
    limit: Option<&str>,
    default_limit: u32,
) -> Result<PageRequest, Vec<FieldError>> {
    let mut v = Violations::new();
    let page = parse_positive(&mut v, "page", "Page must be a positive integer", page, 1, u32::MAX);
    let limit = parse_positive(
        &mut v,
        "limit",
        "Limit must be between 1 and 100",
        limit,
        default_limit,
        PageRequest::MAX_PER_PAGE,
    );
    v.finish(PageRequest::new(page, limit))
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReadBidsError {
    #[error("Item not found")]
    ItemNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Not authorized to view these bids")]
    Forbidden,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<BidQueryError> for ReadBidsError {
    fn from(err: BidQueryError) -> Self {
        match err {
            BidQueryError::Unavailable(msg) => ReadBidsError::Unavailable(msg),
            BidQueryError::DatabaseError(msg) => ReadBidsError::QueryFailed(msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemBids {
    pub item: BidItemSummary,
    pub bids: PageResult<BidWithBidder>,
}

#[derive(Debug, Clone)]
pub struct ItemBidHistory {
    pub item: BidItemSummary,
    pub bids: Vec<BidWithBidder>,
    pub total_bids: u64,
}

#[derive(Debug, Clone)]
pub struct UserBids {
    pub user_name: String,
    /// Bids on items still open for bidding.
    pub active: Vec<BidWithItem>,
    pub past: Vec<BidWithItem>,
}

#[async_trait]
pub trait ItemBidsUseCase: Send + Sync {
    async fn list(&self, item_id: Uuid, page: PageRequest) -> Result<ItemBids, ReadBidsError>;

    async fn history(&self, item_id: Uuid, limit: u32) -> Result<ItemBidHistory, ReadBidsError>;
}

/// Both operations are restricted to the user themselves.
#[async_trait]
pub trait UserBidsUseCase: Send + Sync {
    async fn all(&self, caller_id: Uuid, user_id: Uuid) -> Result<UserBids, ReadBidsError>;

    async fn winning(&self, caller_id: Uuid, user_id: Uuid)
        -> Result<Vec<BidWithItem>, ReadBidsError>;
}
