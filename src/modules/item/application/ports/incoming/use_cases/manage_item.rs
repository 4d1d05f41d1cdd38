use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::item::application::domain::validation::ItemChanges;
use crate::modules::item::application::ports::outgoing::{
    ItemQueryError, ItemRepositoryError, ItemView,
};

/// Failures shared by seller-only edits and deletions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ManageItemError {
    #[error("Item not found")]
    NotFound,

    #[error("Caller is not the seller")]
    NotOwner,

    #[error("Item already has bids")]
    HasBids,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ItemRepositoryError> for ManageItemError {
    fn from(err: ItemRepositoryError) -> Self {
        match err {
            ItemRepositoryError::NotFound => ManageItemError::NotFound,
            ItemRepositoryError::Unavailable(msg) => ManageItemError::Unavailable(msg),
            ItemRepositoryError::DatabaseError(msg) => ManageItemError::RepositoryError(msg),
        }
    }
}

impl From<ItemQueryError> for ManageItemError {
    fn from(err: ItemQueryError) -> Self {
        match err {
            ItemQueryError::Unavailable(msg) => ManageItemError::Unavailable(msg),
            ItemQueryError::DatabaseError(msg) => ManageItemError::RepositoryError(msg),
        }
    }
}

#[async_trait]
pub trait UpdateItemUseCase: Send + Sync {
    async fn execute(
        &self,
        caller_id: Uuid,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<ItemView, ManageItemError>;
}

#[async_trait]
pub trait DeleteItemUseCase: Send + Sync {
    async fn execute(&self, caller_id: Uuid, item_id: Uuid) -> Result<(), ManageItemError>;
}
