use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::item::application::domain::entities::Item;
use crate::modules::item::application::domain::validation::{ItemChanges, ItemDraft};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ItemRepositoryError {
    #[error("Item not found")]
    NotFound,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Outcome of a write that is only allowed while an item has no bids.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardedWrite<T> {
    Applied(T),
    /// The row exists but `bid_count > 0`; nothing was written.
    HasBids,
    NotFound,
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, seller_id: Uuid, draft: ItemDraft) -> Result<Item, ItemRepositoryError>;

    async fn find_by_id(&self, item_id: Uuid) -> Result<Option<Item>, ItemRepositoryError>;

    /// `views = views + 1` in one statement; `false` when the item does not exist.
    async fn increment_views(&self, item_id: Uuid) -> Result<bool, ItemRepositoryError>;

    /// Applies `changes` in a single statement guarded by `bid_count = 0`.
    async fn update_unbid(
        &self,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<GuardedWrite<Item>, ItemRepositoryError>;

    /// Deletes in a single statement guarded by `bid_count = 0`.
    async fn delete_unbid(&self, item_id: Uuid) -> Result<GuardedWrite<()>, ItemRepositoryError>;
}
