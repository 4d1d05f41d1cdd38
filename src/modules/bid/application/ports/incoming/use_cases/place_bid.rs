use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::bid::application::domain::rules::{PlaceBid, PlacementRejection};
use crate::modules::bid::application::ports::outgoing::{BidLedgerError, PlacedBid};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlaceBidError {
    #[error("Bid rejected: {0:?}")]
    Rejected(PlacementRejection),

    /// Retries exhausted against concurrent bids on the same item.
    #[error("Bid conflicted with concurrent updates")]
    Conflict,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<BidLedgerError> for PlaceBidError {
    fn from(err: BidLedgerError) -> Self {
        match err {
            BidLedgerError::Conflict(_) => PlaceBidError::Conflict,
            BidLedgerError::Unavailable(msg) => PlaceBidError::Unavailable(msg),
            BidLedgerError::DatabaseError(msg) => PlaceBidError::RepositoryError(msg),
        }
    }
}

#[async_trait]
pub trait PlaceBidUseCase: Send + Sync {
    async fn execute(&self, bidder_id: Uuid, request: PlaceBid) -> Result<PlacedBid, PlaceBidError>;
}
