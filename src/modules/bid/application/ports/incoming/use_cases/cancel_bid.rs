use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::bid::application::domain::rules::CancelRejection;
use crate::modules::bid::application::ports::outgoing::{BidLedgerError, CancelledBid};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CancelBidError {
    #[error("Cancellation rejected: {0:?}")]
    Rejected(CancelRejection),

    #[error("Cancellation conflicted with concurrent updates")]
    Conflict,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<BidLedgerError> for CancelBidError {
    fn from(err: BidLedgerError) -> Self {
        match err {
            BidLedgerError::Conflict(_) => CancelBidError::Conflict,
            BidLedgerError::Unavailable(msg) => CancelBidError::Unavailable(msg),
            BidLedgerError::DatabaseError(msg) => CancelBidError::RepositoryError(msg),
        }
    }
}

#[async_trait]
pub trait CancelBidUseCase: Send + Sync {
    async fn execute(&self, caller_id: Uuid, bid_id: Uuid) -> Result<CancelledBid, CancelBidError>;
}
