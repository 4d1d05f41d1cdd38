use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::modules::auction::application::ports::incoming::{
    SettleAuctionsError, SettleAuctionsUseCase, SettlementReport,
};
use crate::modules::auction::application::ports::outgoing::{
    SettlementOutcome, SettlementStore, SettlementStoreError, SoldItem,
};
use crate::modules::email::application::ports::outgoing::{AuctionEmailNotifier, AuctionWonEmail};
use crate::modules::email::application::services::send_in_background;

const WON_NOTICE_ATTEMPTS: u32 = 1;

pub struct SettleAuctionsService<S>
where
    S: SettlementStore,
{
    store: S,
    notifier: Arc<dyn AuctionEmailNotifier>,
    batch_size: u64,
}

impl<S> SettleAuctionsService<S>
where
    S: SettlementStore,
{
    pub fn new(store: S, notifier: Arc<dyn AuctionEmailNotifier>, batch_size: u64) -> Self {
        Self {
            store,
            notifier,
            batch_size,
        }
    }

    fn notify_winner(&self, sold: &SoldItem) {
        let notifier = self.notifier.clone();
        let notice = AuctionWonEmail {
            email: sold.winner.email.clone(),
            winner_name: sold.winner.name.clone(),
            item_name: sold.item_name.clone(),
            winning_bid_cents: sold.winning_bid_cents,
        };
        send_in_background("auction_won", WON_NOTICE_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let message = notice.clone();
            async move { notifier.send_auction_won(message).await }
        });
    }
}

#[async_trait]
impl<S> SettleAuctionsUseCase for SettleAuctionsService<S>
where
    S: SettlementStore,
{
    async fn settle_due(&self) -> Result<SettlementReport, SettleAuctionsError> {
        let now = Utc::now();
        let due = self.store.due_items(now, self.batch_size).await?;
        let mut report = SettlementReport::default();

        for item_id in due {
            match self.store.settle(item_id, now).await {
                Ok(SettlementOutcome::Sold(sold)) => {
                    info!(
                        item_id = %sold.item_id,
                        winner_id = %sold.winner.id,
                        winning_bid_cents = sold.winning_bid_cents,
                        "Auction sold"
                    );
                    self.notify_winner(&sold);
                    report.sold += 1;
                }
                Ok(SettlementOutcome::Ended { item_id }) => {
                    info!(item_id = %item_id, "Auction ended without bids");
                    report.ended += 1;
                }
                Ok(SettlementOutcome::Skipped { .. }) => report.skipped += 1,
                Err(e) => {
                    // One bad item must not hold back the rest of the batch
                    error!(item_id = %item_id, error = %e, "Auction settlement failed");
                    report.failed += 1;
                    if let SettlementStoreError::DatabaseError(_) = e {
                        if let Err(e) = self.store.record_failure(item_id, now).await {
                            warn!(item_id = %item_id, error = %e, "Could not record settlement failure");
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::bid::application::domain::entities::BidParty;
    use crate::tests::support::mocks::MockSettlementStoreImpl;
    use crate::tests::support::stubs::RecordingAuctionNotifier;
    use chrono::DateTime;
    use mockall::predicate::eq;
    use std::sync::Mutex;
    use std::time::Duration;
    use uuid::Uuid;

    fn sold(item_id: Uuid) -> SoldItem {
        SoldItem {
            item_id,
            item_name: "Calculus Textbook".to_string(),
            winner: BidParty {
                id: Uuid::new_v4(),
                name: "Alice".to_string(),
                email: "alice@campus.edu".to_string(),
                profile_image: "https://via.placeholder.com/100x100?text=User".to_string(),
            },
            winning_bid_cents: 4_250,
        }
    }

    #[tokio::test]
    async fn settles_batch_and_emails_winner() {
        let sold_id = Uuid::new_v4();
        let unsold_id = Uuid::new_v4();
        let raced_id = Uuid::new_v4();

        let mut store = MockSettlementStoreImpl::new();
        store
            .expect_due_items()
            .withf(|_, limit| *limit == 50)
            .times(1)
            .returning(move |_, _| Ok(vec![sold_id, unsold_id, raced_id]));
        store
            .expect_settle()
            .with(eq(sold_id), mockall::predicate::always())
            .returning(move |id, _| Ok(SettlementOutcome::Sold(sold(id))));
        store
            .expect_settle()
            .with(eq(unsold_id), mockall::predicate::always())
            .returning(|id, _| Ok(SettlementOutcome::Ended { item_id: id }));
        store
            .expect_settle()
            .with(eq(raced_id), mockall::predicate::always())
            .returning(|id, _| Ok(SettlementOutcome::Skipped { item_id: id }));

        let notifier = Arc::new(RecordingAuctionNotifier::default());
        let service = SettleAuctionsService::new(store, notifier.clone(), 50);

        let report = service.settle_due().await.unwrap();
        assert_eq!(
            report,
            SettlementReport {
                sold: 1,
                ended: 1,
                skipped: 1,
                failed: 0
            }
        );

        notifier.wait_for(1, Duration::from_secs(1)).await;
        let won = notifier.won();
        assert_eq!(won.len(), 1);
        assert_eq!(won[0].email, "alice@campus.edu");
        assert_eq!(won[0].winning_bid_cents, 4_250);
    }

    #[tokio::test]
    async fn failed_item_does_not_stop_the_batch() {
        let broken = Uuid::new_v4();
        let fine = Uuid::new_v4();

        let mut store = MockSettlementStoreImpl::new();
        store
            .expect_due_items()
            .returning(move |_, _| Ok(vec![broken, fine]));
        store
            .expect_settle()
            .with(eq(broken), mockall::predicate::always())
            .returning(|_, _| Err(SettlementStoreError::DatabaseError("deadlock".into())));
        store
            .expect_settle()
            .with(eq(fine), mockall::predicate::always())
            .times(1)
            .returning(|id, _| Ok(SettlementOutcome::Ended { item_id: id }));
        store
            .expect_record_failure()
            .with(eq(broken), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let service =
            SettleAuctionsService::new(store, Arc::new(RecordingAuctionNotifier::default()), 10);

        let report = service.settle_due().await.unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.ended, 1);
    }

    struct DueItem {
        id: Uuid,
        ends_at: DateTime<Utc>,
        broken: bool,
        settled: bool,
        failures: u32,
        retry_at: Option<DateTime<Utc>>,
    }

    /// Orders and holds back items the way the Postgres store does.
    #[derive(Clone, Default)]
    struct InMemorySettlementStore {
        items: Arc<Mutex<Vec<DueItem>>>,
    }

    impl InMemorySettlementStore {
        fn add(&self, ends_at: DateTime<Utc>, broken: bool) -> Uuid {
            let id = Uuid::new_v4();
            self.items.lock().unwrap().push(DueItem {
                id,
                ends_at,
                broken,
                settled: false,
                failures: 0,
                retry_at: None,
            });
            id
        }

        fn is_settled(&self, id: Uuid) -> bool {
            self.items.lock().unwrap().iter().any(|i| i.id == id && i.settled)
        }
    }

    #[async_trait]
    impl SettlementStore for InMemorySettlementStore {
        async fn due_items(
            &self,
            now: DateTime<Utc>,
            limit: u64,
        ) -> Result<Vec<Uuid>, SettlementStoreError> {
            let items = self.items.lock().unwrap();
            let mut due: Vec<&DueItem> = items
                .iter()
                .filter(|i| !i.settled && i.ends_at <= now)
                .filter(|i| i.retry_at.map_or(true, |at| at <= now))
                .collect();
            due.sort_by_key(|i| (i.failures, i.ends_at));
            Ok(due.into_iter().take(limit as usize).map(|i| i.id).collect())
        }

        async fn settle(
            &self,
            item_id: Uuid,
            _now: DateTime<Utc>,
        ) -> Result<SettlementOutcome, SettlementStoreError> {
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| SettlementStoreError::DatabaseError("missing".into()))?;
            if item.broken {
                return Err(SettlementStoreError::DatabaseError(
                    "value out of range for type bigint".into(),
                ));
            }
            item.settled = true;
            Ok(SettlementOutcome::Ended { item_id })
        }

        async fn record_failure(
            &self,
            item_id: Uuid,
            now: DateTime<Utc>,
        ) -> Result<(), SettlementStoreError> {
            let mut items = self.items.lock().unwrap();
            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                item.failures += 1;
                item.retry_at = Some(now + chrono::Duration::minutes(15));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn items_that_keep_failing_do_not_starve_later_auctions() {
        let now = Utc::now();
        let store = InMemorySettlementStore::default();
        store.add(now - chrono::Duration::hours(3), true);
        store.add(now - chrono::Duration::hours(2), true);
        let later = store.add(now - chrono::Duration::minutes(5), false);

        let service = SettleAuctionsService::new(
            store.clone(),
            Arc::new(RecordingAuctionNotifier::default()),
            2,
        );

        let first = service.settle_due().await.unwrap();
        assert_eq!(first.failed, 2);
        assert!(!store.is_settled(later));

        let second = service.settle_due().await.unwrap();
        assert_eq!(second.ended, 1);
        assert_eq!(second.failed, 0);
        assert!(store.is_settled(later));
    }

    #[tokio::test]
    async fn unavailable_database_fails_the_pass() {
        let mut store = MockSettlementStoreImpl::new();
        store
            .expect_due_items()
            .returning(|_, _| Err(SettlementStoreError::Unavailable("pool timed out".into())));
        store.expect_settle().never();

        let service =
            SettleAuctionsService::new(store, Arc::new(RecordingAuctionNotifier::default()), 10);

        assert!(matches!(
            service.settle_due().await,
            Err(SettleAuctionsError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn nothing_due_is_an_empty_report() {
        let mut store = MockSettlementStoreImpl::new();
        store.expect_due_items().returning(|_, _| Ok(Vec::new()));

        let service =
            SettleAuctionsService::new(store, Arc::new(RecordingAuctionNotifier::default()), 10);

        assert!(service.settle_due().await.unwrap().is_empty());
    }
}
