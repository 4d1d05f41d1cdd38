use async_trait::async_trait;

use super::user_email_notifier::UserEmailNotificationError;

#[derive(Debug, Clone, PartialEq)]
pub struct BidConfirmationEmail {
    pub email: String,
    pub bidder_name: String,
    pub item_name: String,
    pub amount_cents: i64,
}

/// Sent to the previous leader when a higher bid lands.
#[derive(Debug, Clone, PartialEq)]
pub struct OutbidEmail {
    pub email: String,
    pub bidder_name: String,
    pub item_name: String,
    /// The bid that was overtaken.
    pub previous_amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuctionWonEmail {
    pub email: String,
    pub winner_name: String,
    pub item_name: String,
    pub winning_bid_cents: i64,
}

#[async_trait]
pub trait AuctionEmailNotifier: Send + Sync {
    async fn send_bid_confirmation(
        &self,
        message: BidConfirmationEmail,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_outbid_notice(&self, message: OutbidEmail)
        -> Result<(), UserEmailNotificationError>;

    async fn send_auction_won(
        &self,
        message: AuctionWonEmail,
    ) -> Result<(), UserEmailNotificationError>;
}
