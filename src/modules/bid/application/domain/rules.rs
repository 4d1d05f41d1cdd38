//! Checks applied while the item row is locked, shared by every ledger implementation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entities::{Bid, BidStatus};
use crate::modules::item::application::domain::entities::Item;
use crate::shared::money::{dollars_to_cents, format_dollars};
use crate::shared::validation::{FieldError, Violations};

/// $1,000,000. Keeps bid totals and buyer spend far inside `bigint`.
pub const MAX_BID_CENTS: i64 = 100_000_000;

/// A bid request that passed input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceBid {
    pub item_id: Uuid,
    pub amount_cents: i64,
}

impl PlaceBid {
    pub fn parse(item_id: Option<&str>, amount: Option<f64>) -> Result<Self, Vec<FieldError>> {
        let mut v = Violations::new();

        let item_id = match item_id.map(str::trim).map(Uuid::parse_str) {
            Some(Ok(id)) => Some(id),
            Some(Err(_)) | None => {
                v.push("itemId", "Valid item ID is required");
                None
            }
        };

        let amount_cents = match amount.and_then(dollars_to_cents) {
            Some(cents) if cents > MAX_BID_CENTS => {
                v.push("amount", "Bid amount cannot exceed $1,000,000");
                None
            }
            Some(cents) if cents >= 1 => Some(cents),
            _ => {
                v.push("amount", "Bid amount must be at least $0.01");
                None
            }
        };

        match (item_id, amount_cents) {
            (Some(item_id), Some(amount_cents)) if v.is_empty() => Ok(PlaceBid {
                item_id,
                amount_cents,
            }),
            _ => Err(v.into_errors()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    ItemNotFound,
    AuctionNotActive,
    BidderNotFound,
    SelfBid,
    TooLow {
        minimum_cents: i64,
        increment_cents: i64,
    },
}

impl PlacementRejection {
    pub fn code(&self) -> &'static str {
        match self {
            PlacementRejection::ItemNotFound => "ITEM_NOT_FOUND",
            PlacementRejection::AuctionNotActive => "AUCTION_NOT_ACTIVE",
            PlacementRejection::BidderNotFound => "BIDDER_NOT_FOUND",
            PlacementRejection::SelfBid => "SELF_BID",
            PlacementRejection::TooLow { .. } => "BID_TOO_LOW",
        }
    }

    pub fn message(&self) -> String {
        match self {
            PlacementRejection::ItemNotFound => "Item not found".to_string(),
            PlacementRejection::AuctionNotActive => {
                "Auction has ended or item is not active".to_string()
            }
            PlacementRejection::BidderNotFound => "Bidder not found".to_string(),
            PlacementRejection::SelfBid => "You cannot bid on your own item".to_string(),
            PlacementRejection::TooLow {
                minimum_cents,
                increment_cents,
            } => format!(
                "Bid must be at least ${} (current bid + ${} increment)",
                format_dollars(*minimum_cents),
                format_dollars(*increment_cents)
            ),
        }
    }
}

/// Item-level checks, in the order clients see them. The bidder lookup sits between
/// the first and the second, so callers pass whether the bidder exists.
pub fn check_placement(
    item: &Item,
    bidder_exists: bool,
    bidder_id: Uuid,
    amount_cents: i64,
    now: DateTime<Utc>,
) -> Result<(), PlacementRejection> {
    if !item.is_biddable(now) {
        return Err(PlacementRejection::AuctionNotActive);
    }
    if !bidder_exists {
        return Err(PlacementRejection::BidderNotFound);
    }
    if item.seller_id == bidder_id {
        return Err(PlacementRejection::SelfBid);
    }

    let minimum_cents = item.minimum_next_bid_cents();
    if amount_cents < minimum_cents {
        return Err(PlacementRejection::TooLow {
            minimum_cents,
            increment_cents: item.min_bid_increment_cents,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelRejection {
    BidNotFound,
    NotOwner,
    NotActive,
    WindowExpired,
}

impl CancelRejection {
    pub fn code(&self) -> &'static str {
        match self {
            CancelRejection::BidNotFound => "BID_NOT_FOUND",
            CancelRejection::NotOwner => "NOT_BID_OWNER",
            CancelRejection::NotActive => "BID_NOT_ACTIVE",
            CancelRejection::WindowExpired => "CANCEL_WINDOW_EXPIRED",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CancelRejection::BidNotFound => "Bid not found",
            CancelRejection::NotOwner => "Not authorized to delete this bid",
            CancelRejection::NotActive => "Can only cancel active bids",
            CancelRejection::WindowExpired => {
                "Bid can only be cancelled within 5 minutes of placement"
            }
        }
    }
}

pub fn check_cancellation(
    bid: &Bid,
    caller_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), CancelRejection> {
    if bid.bidder_id != caller_id {
        return Err(CancelRejection::NotOwner);
    }
    if bid.status != BidStatus::Active {
        return Err(CancelRejection::NotActive);
    }
    if !bid.within_cancel_window(now) {
        return Err(CancelRejection::WindowExpired);
    }
    Ok(())
}

/// The bid that takes over after `cancelled` is withdrawn: the highest of those placed before it.
pub fn successor<'a>(cancelled: &Bid, others: &'a [Bid]) -> Option<&'a Bid> {
    others
        .iter()
        .filter(|b| b.id != cancelled.id && b.created_at < cancelled.created_at)
        .max_by_key(|b| (b.amount_cents, b.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::bid::application::domain::entities::sample_bid;
    use crate::modules::item::application::domain::entities::{sample_item, ItemStatus};
    use chrono::Duration;

    #[test]
    fn parse_reports_both_fields() {
        let errors = PlaceBid::parse(Some("abc"), Some(0.0)).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["itemId", "amount"]);

        let id = Uuid::new_v4();
        assert_eq!(
            PlaceBid::parse(Some(&id.to_string()), Some(25.5)),
            Ok(PlaceBid {
                item_id: id,
                amount_cents: 2_550
            })
        );
    }

    #[test]
    fn parse_caps_bid_amount() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(
            PlaceBid::parse(Some(&id), Some(1_000_000.0)).map(|b| b.amount_cents),
            Ok(MAX_BID_CENTS)
        );

        let errors = PlaceBid::parse(Some(&id), Some(1_000_000.01)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "amount");
        assert_eq!(errors[0].message, "Bid amount cannot exceed $1,000,000");

        let errors = PlaceBid::parse(Some(&id), Some(92_233_720_368_547_758.07)).unwrap_err();
        assert_eq!(errors[0].field, "amount");
    }

    #[test]
    fn placement_checks_run_in_order() {
        let seller = Uuid::new_v4();
        let bidder = Uuid::new_v4();
        let now = Utc::now();
        let mut item = sample_item(seller);

        assert_eq!(check_placement(&item, true, bidder, 2_100, now), Ok(()));
        assert_eq!(
            check_placement(&item, false, bidder, 2_100, now),
            Err(PlacementRejection::BidderNotFound)
        );
        assert_eq!(
            check_placement(&item, true, seller, 2_100, now),
            Err(PlacementRejection::SelfBid)
        );

        item.status = ItemStatus::Sold;
        assert_eq!(
            check_placement(&item, false, seller, 1, now),
            Err(PlacementRejection::AuctionNotActive)
        );
    }

    #[test]
    fn too_low_message_names_minimum_and_increment() {
        let item = sample_item(Uuid::new_v4());
        let rejection = check_placement(&item, true, Uuid::new_v4(), 2_099, Utc::now()).unwrap_err();
        assert_eq!(rejection.code(), "BID_TOO_LOW");
        assert_eq!(
            rejection.message(),
            "Bid must be at least $21.00 (current bid + $1.00 increment)"
        );
    }

    #[test]
    fn expired_auction_rejects_bids() {
        let mut item = sample_item(Uuid::new_v4());
        item.auction_end_date = Utc::now() - Duration::seconds(1);
        assert_eq!(
            check_placement(&item, true, Uuid::new_v4(), 10_000, Utc::now()),
            Err(PlacementRejection::AuctionNotActive)
        );
    }

    #[test]
    fn cancellation_checks_owner_then_status_then_window() {
        let bidder = Uuid::new_v4();
        let mut bid = sample_bid(Uuid::new_v4(), bidder, 500);
        let now = bid.created_at + Duration::minutes(1);

        assert_eq!(check_cancellation(&bid, bidder, now), Ok(()));
        assert_eq!(
            check_cancellation(&bid, Uuid::new_v4(), now),
            Err(CancelRejection::NotOwner)
        );
        assert_eq!(
            check_cancellation(&bid, bidder, bid.created_at + Duration::minutes(6)),
            Err(CancelRejection::WindowExpired)
        );

        bid.status = BidStatus::Outbid;
        assert_eq!(check_cancellation(&bid, bidder, now), Err(CancelRejection::NotActive));
    }

    #[test]
    fn successor_is_highest_earlier_bid() {
        let item = Uuid::new_v4();
        let now = Utc::now();
        let mut first = sample_bid(item, Uuid::new_v4(), 1_000);
        first.created_at = now - Duration::minutes(3);
        let mut second = sample_bid(item, Uuid::new_v4(), 1_500);
        second.created_at = now - Duration::minutes(2);
        let mut cancelled = sample_bid(item, Uuid::new_v4(), 2_000);
        cancelled.created_at = now - Duration::minutes(1);
        let mut later = sample_bid(item, Uuid::new_v4(), 2_500);
        later.created_at = now;

        let others = vec![first, second.clone(), later];
        assert_eq!(successor(&cancelled, &others), Some(&second));
        assert_eq!(successor(&others[0], &others), None);
    }
}
