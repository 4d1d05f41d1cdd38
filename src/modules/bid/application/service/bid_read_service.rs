use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::modules::bid::application::ports::incoming::use_cases::{
    ItemBidHistory, ItemBids, ItemBidsUseCase, ReadBidsError, UserBids, UserBidsUseCase,
};
use crate::modules::bid::application::ports::outgoing::{BidItemSummary, BidQuery, BidWithItem};
use crate::shared::api::PageRequest;

/// Read-only bid listings for items and users.
pub struct BidReadService<Q>
where
    Q: BidQuery,
{
    query: Q,
}

impl<Q> BidReadService<Q>
where
    Q: BidQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    async fn item(&self, item_id: Uuid) -> Result<BidItemSummary, ReadBidsError> {
        self.query
            .item_summary(item_id)
            .await?
            .ok_or(ReadBidsError::ItemNotFound)
    }
}

fn ensure_self(caller_id: Uuid, user_id: Uuid) -> Result<(), ReadBidsError> {
    if caller_id == user_id {
        Ok(())
    } else {
        tracing::warn!(caller_id = %caller_id, user_id = %user_id, "Bid listing for another user rejected");
        Err(ReadBidsError::Forbidden)
    }
}

#[async_trait]
impl<Q> ItemBidsUseCase for BidReadService<Q>
where
    Q: BidQuery,
{
    async fn list(&self, item_id: Uuid, page: PageRequest) -> Result<ItemBids, ReadBidsError> {
        let item = self.item(item_id).await?;
        let bids = self.query.item_bids(item_id, page).await?;
        Ok(ItemBids { item, bids })
    }

    async fn history(&self, item_id: Uuid, limit: u32) -> Result<ItemBidHistory, ReadBidsError> {
        let item = self.item(item_id).await?;
        let bids = self.query.item_history(item_id, u64::from(limit)).await?;
        let total_bids = self.query.count_item_bids(item_id).await?;
        Ok(ItemBidHistory {
            item,
            bids,
            total_bids,
        })
    }
}

#[async_trait]
impl<Q> UserBidsUseCase for BidReadService<Q>
where
    Q: BidQuery,
{
    async fn all(&self, caller_id: Uuid, user_id: Uuid) -> Result<UserBids, ReadBidsError> {
        let user_name = self
            .query
            .user_name(user_id)
            .await?
            .ok_or(ReadBidsError::UserNotFound)?;
        ensure_self(caller_id, user_id)?;

        let now = Utc::now();
        let (active, past): (Vec<BidWithItem>, Vec<BidWithItem>) = self
            .query
            .user_bids(user_id)
            .await?
            .into_iter()
            .partition(|entry| entry.item.is_biddable(now));

        Ok(UserBids {
            user_name,
            active,
            past,
        })
    }

    async fn winning(
        &self,
        caller_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<BidWithItem>, ReadBidsError> {
        ensure_self(caller_id, user_id)?;
        Ok(self.query.winning_bids(user_id, Utc::now()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::bid::application::domain::entities::sample_bid;
    use crate::modules::bid::application::ports::outgoing::bid_query::summary_of;
    use crate::modules::bid::application::ports::outgoing::BidQueryError;
    use crate::modules::item::application::domain::entities::{sample_item, ItemStatus};
    use crate::tests::support::mocks::MockBidQueryImpl;
    use mockall::predicate::eq;

    fn entry(user_id: Uuid, status: ItemStatus) -> BidWithItem {
        let mut item = sample_item(Uuid::new_v4());
        item.status = status;
        BidWithItem {
            bid: sample_bid(item.id, user_id, 2_100),
            item: summary_of(&item),
            seller: None,
        }
    }

    #[tokio::test]
    async fn user_bids_split_by_biddability() {
        let user_id = Uuid::new_v4();
        let mut query = MockBidQueryImpl::new();
        query
            .expect_user_name()
            .with(eq(user_id))
            .returning(|_| Ok(Some("Alice".to_string())));
        query.expect_user_bids().returning(move |id| {
            Ok(vec![
                entry(id, ItemStatus::Active),
                entry(id, ItemStatus::Sold),
                entry(id, ItemStatus::Ended),
            ])
        });

        let bids = BidReadService::new(query).all(user_id, user_id).await.unwrap();
        assert_eq!(bids.user_name, "Alice");
        assert_eq!(bids.active.len(), 1);
        assert_eq!(bids.past.len(), 2);
    }

    #[tokio::test]
    async fn missing_user_comes_before_authorization() {
        let mut query = MockBidQueryImpl::new();
        query.expect_user_name().returning(|_| Ok(None));

        let result = BidReadService::new(query)
            .all(Uuid::new_v4(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(ReadBidsError::UserNotFound)));
    }

    #[tokio::test]
    async fn other_users_bids_are_forbidden() {
        let mut query = MockBidQueryImpl::new();
        query
            .expect_user_name()
            .returning(|_| Ok(Some("Alice".to_string())));
        query.expect_winning_bids().never();

        let service = BidReadService::new(query);
        let caller = Uuid::new_v4();
        let target = Uuid::new_v4();

        assert!(matches!(service.all(caller, target).await, Err(ReadBidsError::Forbidden)));
        assert!(matches!(service.winning(caller, target).await, Err(ReadBidsError::Forbidden)));
    }

    #[tokio::test]
    async fn item_bids_require_the_item() {
        let mut query = MockBidQueryImpl::new();
        query.expect_item_summary().returning(|_| Ok(None));
        query.expect_item_bids().never();

        let result = BidReadService::new(query)
            .list(Uuid::new_v4(), PageRequest::new(1, 10))
            .await;
        assert!(matches!(result, Err(ReadBidsError::ItemNotFound)));
    }

    #[tokio::test]
    async fn history_reports_total_count() {
        let item = sample_item(Uuid::new_v4());
        let summary = summary_of(&item);
        let mut query = MockBidQueryImpl::new();
        query
            .expect_item_summary()
            .returning(move |_| Ok(Some(summary.clone())));
        query
            .expect_item_history()
            .with(eq(item.id), eq(20))
            .returning(|_, _| Ok(vec![]));
        query.expect_count_item_bids().returning(|_| Ok(42));

        let history = BidReadService::new(query).history(item.id, 20).await.unwrap();
        assert_eq!(history.total_bids, 42);
        assert_eq!(history.item.name, "Calculus textbook");
    }

    #[tokio::test]
    async fn query_outage_is_unavailable() {
        let mut query = MockBidQueryImpl::new();
        query
            .expect_item_summary()
            .returning(|_| Err(BidQueryError::Unavailable("refused".into())));
        query.expect_item_bids().never();

        let result = BidReadService::new(query)
            .list(Uuid::new_v4(), PageRequest::default())
            .await;
        assert!(matches!(result, Err(ReadBidsError::Unavailable(_))));
    }
}
