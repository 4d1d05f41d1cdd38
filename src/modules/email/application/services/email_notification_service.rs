use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use super::templates::{self, RenderedEmail};
use crate::modules::email::application::ports::outgoing::{
    AuctionEmailNotifier, AuctionWonEmail, BidConfirmationEmail, EmailSender, OutbidEmail,
    UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};

/// Renders the branded templates and hands them to the configured [`EmailSender`].
#[derive(Clone)]
pub struct EmailNotificationService {
    sender: Arc<dyn EmailSender>,
}

impl fmt::Debug for EmailNotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailNotificationService")
            .field("sender", &"<dyn EmailSender>")
            .finish()
    }
}

impl EmailNotificationService {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    async fn deliver(&self, to: &str, email: RenderedEmail) -> Result<(), UserEmailNotificationError> {
        self.sender
            .send_email(to, &email.subject, &email.html)
            .await
            .map_err(UserEmailNotificationError::EmailSendingFailed)
    }
}

#[async_trait]
impl UserEmailNotifier for EmailNotificationService {
    async fn send_verification_email(
        &self,
        message: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let email = templates::verification(&message.name, &message.code);
        self.deliver(&message.email, email).await
    }
}

#[async_trait]
impl AuctionEmailNotifier for EmailNotificationService {
    async fn send_bid_confirmation(
        &self,
        message: BidConfirmationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let email = templates::bid_confirmation(
            &message.bidder_name,
            &message.item_name,
            message.amount_cents,
        );
        self.deliver(&message.email, email).await
    }

    async fn send_outbid_notice(
        &self,
        message: OutbidEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let email = templates::outbid(
            &message.bidder_name,
            &message.item_name,
            message.previous_amount_cents,
        );
        self.deliver(&message.email, email).await
    }

    async fn send_auction_won(
        &self,
        message: AuctionWonEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let email = templates::auction_won(
            &message.winner_name,
            &message.item_name,
            message.winning_bid_cents,
        );
        self.deliver(&message.email, email).await
    }
}
