use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::conflict_retry::retry_on_conflict;
use crate::modules::bid::application::ports::incoming::use_cases::{
    CancelBidError, CancelBidUseCase,
};
use crate::modules::bid::application::ports::outgoing::{BidLedger, CancelOutcome, CancelledBid};

pub struct CancelBidService<L>
where
    L: BidLedger,
{
    ledger: L,
}

impl<L> CancelBidService<L>
where
    L: BidLedger,
{
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<L> CancelBidUseCase for CancelBidService<L>
where
    L: BidLedger,
{
    async fn execute(&self, caller_id: Uuid, bid_id: Uuid) -> Result<CancelledBid, CancelBidError> {
        let outcome = retry_on_conflict("cancel_bid", || {
            self.ledger.cancel(caller_id, bid_id, Utc::now())
        })
        .await?;

        match outcome {
            CancelOutcome::Cancelled(cancelled) => {
                info!(
                    bid_id = %bid_id,
                    item_id = %cancelled.item_id,
                    new_current_bid_cents = cancelled.new_current_bid_cents,
                    "Bid cancelled"
                );
                Ok(cancelled)
            }
            CancelOutcome::Rejected(rejection) => {
                info!(bid_id = %bid_id, caller_id = %caller_id, reason = rejection.code(), "Bid cancellation rejected");
                Err(CancelBidError::Rejected(rejection))
            }
        }
    }
}
