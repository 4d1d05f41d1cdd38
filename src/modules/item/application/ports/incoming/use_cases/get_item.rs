use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::item::application::ports::outgoing::{
    ItemQueryError, ItemRepositoryError, ItemView,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetItemError {
    #[error("Item not found")]
    NotFound,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<ItemQueryError> for GetItemError {
    fn from(err: ItemQueryError) -> Self {
        match err {
            ItemQueryError::Unavailable(msg) => GetItemError::Unavailable(msg),
            ItemQueryError::DatabaseError(msg) => GetItemError::QueryFailed(msg),
        }
    }
}

impl From<ItemRepositoryError> for GetItemError {
    fn from(err: ItemRepositoryError) -> Self {
        match err {
            ItemRepositoryError::NotFound => GetItemError::NotFound,
            ItemRepositoryError::Unavailable(msg) => GetItemError::Unavailable(msg),
            ItemRepositoryError::DatabaseError(msg) => GetItemError::QueryFailed(msg),
        }
    }
}

/// Public item detail. Each successful read counts one view.
#[async_trait]
pub trait GetItemUseCase: Send + Sync {
    async fn execute(&self, item_id: Uuid) -> Result<ItemView, GetItemError>;
}
