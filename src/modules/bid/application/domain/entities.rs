use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// How long after placement a bidder may still withdraw a bid.
pub const CANCEL_WINDOW_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    /// Current highest bid on a running auction. At most one per item.
    Active,
    Outbid,
    Winning,
    Won,
    Lost,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Active => "active",
            BidStatus::Outbid => "outbid",
            BidStatus::Winning => "winning",
            BidStatus::Won => "won",
            BidStatus::Lost => "lost",
        }
    }
}

impl FromStr for BidStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BidStatus::Active),
            "outbid" => Ok(BidStatus::Outbid),
            "winning" => Ok(BidStatus::Winning),
            "won" => Ok(BidStatus::Won),
            "lost" => Ok(BidStatus::Lost),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub id: Uuid,
    pub item_id: Uuid,
    pub bidder_id: Uuid,
    pub amount_cents: i64,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    pub fn within_cancel_window(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at <= Duration::minutes(CANCEL_WINDOW_MINUTES)
    }
}

/// A participant as seen by bid responses and notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct BidParty {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_image: String,
}

#[cfg(test)]
pub(crate) fn sample_bid(item_id: Uuid, bidder_id: Uuid, amount_cents: i64) -> Bid {
    let now = Utc::now();
    Bid {
        id: Uuid::new_v4(),
        item_id,
        bidder_id,
        amount_cents,
        status: BidStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_window_is_five_minutes() {
        let bid = sample_bid(Uuid::new_v4(), Uuid::new_v4(), 500);
        assert!(bid.within_cancel_window(bid.created_at + Duration::minutes(5)));
        assert!(!bid.within_cancel_window(bid.created_at + Duration::minutes(5) + Duration::seconds(1)));
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            BidStatus::Active,
            BidStatus::Outbid,
            BidStatus::Winning,
            BidStatus::Won,
            BidStatus::Lost,
        ] {
            assert_eq!(status.as_str().parse::<BidStatus>(), Ok(status));
        }
        assert!("pending".parse::<BidStatus>().is_err());
    }
}
