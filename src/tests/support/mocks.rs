//! mockall doubles for outgoing ports, shared by service tests across modules.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::modules::auction::application::ports::outgoing::{
    SettlementOutcome, SettlementStore, SettlementStoreError,
};
use crate::modules::auth::application::domain::entities::{NewUser, User, VerificationCode};
use crate::modules::auth::application::ports::outgoing::{
    UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};
use crate::modules::bid::application::domain::rules::PlaceBid;
use crate::modules::bid::application::ports::outgoing::{
    BidItemSummary, BidLedger, BidLedgerError, BidQuery, BidQueryError, BidWithBidder, BidWithItem,
    CancelOutcome, PlacementOutcome,
};
use crate::modules::item::application::domain::entities::Item;
use crate::modules::item::application::domain::validation::{ItemChanges, ItemDraft};
use crate::modules::item::application::ports::outgoing::{
    GuardedWrite, ItemListFilter, ItemQuery, ItemQueryError, ItemRepository, ItemRepositoryError,
    ItemSort, ItemView,
};
use crate::shared::api::{PageRequest, PageResult};

mock! {
    pub UserQueryImpl {}
    #[async_trait]
    impl UserQuery for UserQueryImpl {
        async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;
    }
}

mock! {
    pub UserRepositoryImpl {}
    #[async_trait]
    impl UserRepository for UserRepositoryImpl {
        async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;
        async fn set_verification_code(
            &self,
            user_id: Uuid,
            verification: VerificationCode,
        ) -> Result<(), UserRepositoryError>;
        async fn mark_email_verified(
            &self,
            user_id: Uuid,
            at: DateTime<Utc>,
        ) -> Result<User, UserRepositoryError>;
    }
}

mock! {
    pub ItemQueryImpl {}
    #[async_trait]
    impl ItemQuery for ItemQueryImpl {
        async fn list_biddable(
            &self,
            filter: ItemListFilter,
            sort: ItemSort,
            page: PageRequest,
            now: DateTime<Utc>,
        ) -> Result<PageResult<ItemView>, ItemQueryError>;
        async fn find_view(&self, item_id: Uuid) -> Result<Option<ItemView>, ItemQueryError>;
        async fn featured(&self, now: DateTime<Utc>, limit: u64)
            -> Result<Vec<ItemView>, ItemQueryError>;
        async fn ending_soon(
            &self,
            now: DateTime<Utc>,
            window: Duration,
            limit: u64,
        ) -> Result<Vec<ItemView>, ItemQueryError>;
    }
}

mock! {
    pub ItemRepositoryImpl {}
    #[async_trait]
    impl ItemRepository for ItemRepositoryImpl {
        async fn create(&self, seller_id: Uuid, draft: ItemDraft) -> Result<Item, ItemRepositoryError>;
        async fn find_by_id(&self, item_id: Uuid) -> Result<Option<Item>, ItemRepositoryError>;
        async fn increment_views(&self, item_id: Uuid) -> Result<bool, ItemRepositoryError>;
        async fn update_unbid(
            &self,
            item_id: Uuid,
            changes: ItemChanges,
        ) -> Result<GuardedWrite<Item>, ItemRepositoryError>;
        async fn delete_unbid(&self, item_id: Uuid) -> Result<GuardedWrite<()>, ItemRepositoryError>;
    }
}

mock! {
    pub BidLedgerImpl {}
    #[async_trait]
    impl BidLedger for BidLedgerImpl {
        async fn place(
            &self,
            bidder_id: Uuid,
            request: PlaceBid,
            now: DateTime<Utc>,
        ) -> Result<PlacementOutcome, BidLedgerError>;
        async fn cancel(
            &self,
            caller_id: Uuid,
            bid_id: Uuid,
            now: DateTime<Utc>,
        ) -> Result<CancelOutcome, BidLedgerError>;
    }
}

mock! {
    pub BidQueryImpl {}
    #[async_trait]
    impl BidQuery for BidQueryImpl {
        async fn item_summary(&self, item_id: Uuid) -> Result<Option<BidItemSummary>, BidQueryError>;
        async fn user_name(&self, user_id: Uuid) -> Result<Option<String>, BidQueryError>;
        async fn item_bids(
            &self,
            item_id: Uuid,
            page: PageRequest,
        ) -> Result<PageResult<BidWithBidder>, BidQueryError>;
        async fn item_history(
            &self,
            item_id: Uuid,
            limit: u64,
        ) -> Result<Vec<BidWithBidder>, BidQueryError>;
        async fn count_item_bids(&self, item_id: Uuid) -> Result<u64, BidQueryError>;
        async fn user_bids(&self, bidder_id: Uuid) -> Result<Vec<BidWithItem>, BidQueryError>;
        async fn winning_bids(
            &self,
            bidder_id: Uuid,
            now: DateTime<Utc>,
        ) -> Result<Vec<BidWithItem>, BidQueryError>;
    }
}

mock! {
    pub SettlementStoreImpl {}
    #[async_trait]
    impl SettlementStore for SettlementStoreImpl {
        async fn due_items(
            &self,
            now: DateTime<Utc>,
            limit: u64,
        ) -> Result<Vec<Uuid>, SettlementStoreError>;
        async fn settle(
            &self,
            item_id: Uuid,
            now: DateTime<Utc>,
        ) -> Result<SettlementOutcome, SettlementStoreError>;
        async fn record_failure(
            &self,
            item_id: Uuid,
            now: DateTime<Utc>,
        ) -> Result<(), SettlementStoreError>;
    }
}
