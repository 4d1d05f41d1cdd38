pub mod auction_email_notifier;
pub mod email_sender;
pub mod user_email_notifier;

pub use auction_email_notifier::{
    AuctionEmailNotifier, AuctionWonEmail, BidConfirmationEmail, OutbidEmail,
};
pub use email_sender::EmailSender;
pub use user_email_notifier::{UserEmailNotificationError, UserEmailNotifier, VerificationEmail};
