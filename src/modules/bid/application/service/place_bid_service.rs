use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::conflict_retry::retry_on_conflict;
use crate::modules::bid::application::domain::rules::PlaceBid;
use crate::modules::bid::application::ports::incoming::use_cases::{PlaceBidError, PlaceBidUseCase};
use crate::modules::bid::application::ports::outgoing::{BidLedger, PlacedBid, PlacementOutcome};
use crate::modules::email::application::ports::outgoing::{
    AuctionEmailNotifier, BidConfirmationEmail, OutbidEmail,
};
use crate::modules::email::application::services::send_in_background;

/// Bid notices are best-effort and sent once.
const NOTICE_ATTEMPTS: u32 = 1;

pub struct PlaceBidService<L>
where
    L: BidLedger,
{
    ledger: L,
    notifier: Arc<dyn AuctionEmailNotifier>,
}

impl<L> PlaceBidService<L>
where
    L: BidLedger,
{
    pub fn new(ledger: L, notifier: Arc<dyn AuctionEmailNotifier>) -> Self {
        Self { ledger, notifier }
    }

    fn notify(&self, placed: &PlacedBid) {
        let notifier = self.notifier.clone();
        let confirmation = BidConfirmationEmail {
            email: placed.bidder.email.clone(),
            bidder_name: placed.bidder.name.clone(),
            item_name: placed.item.name.clone(),
            amount_cents: placed.bid.amount_cents,
        };
        send_in_background("bid_confirmation", NOTICE_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let message = confirmation.clone();
            async move { notifier.send_bid_confirmation(message).await }
        });

        // Raising your own bid is not being outbid
        let Some(previous) = placed
            .previous_leader
            .as_ref()
            .filter(|previous| previous.party.id != placed.bidder.id)
        else {
            return;
        };

        let notifier = self.notifier.clone();
        let notice = OutbidEmail {
            email: previous.party.email.clone(),
            bidder_name: previous.party.name.clone(),
            item_name: placed.item.name.clone(),
            previous_amount_cents: previous.amount_cents,
        };
        send_in_background("outbid", NOTICE_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let message = notice.clone();
            async move { notifier.send_outbid_notice(message).await }
        });
    }
}

#[async_trait]
impl<L> PlaceBidUseCase for PlaceBidService<L>
where
    L: BidLedger,
{
    async fn execute(&self, bidder_id: Uuid, request: PlaceBid) -> Result<PlacedBid, PlaceBidError> {
        let outcome = retry_on_conflict("place_bid", || {
            self.ledger.place(bidder_id, request, Utc::now())
        })
        .await?;

        let placed = match outcome {
            PlacementOutcome::Placed(placed) => placed,
            PlacementOutcome::Rejected(rejection) => {
                info!(
                    item_id = %request.item_id,
                    bidder_id = %bidder_id,
                    reason = rejection.code(),
                    "Bid rejected"
                );
                return Err(PlaceBidError::Rejected(rejection));
            }
        };

        info!(
            bid_id = %placed.bid.id,
            item_id = %placed.item.id,
            bidder_id = %bidder_id,
            amount_cents = placed.bid.amount_cents,
            bid_count = placed.item.bid_count,
            "Bid placed"
        );
        self.notify(&placed);

        Ok(placed)
    }
}
