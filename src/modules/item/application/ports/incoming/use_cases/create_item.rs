use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::item::application::domain::validation::ItemDraft;
use crate::modules::item::application::ports::outgoing::{
    ItemQueryError, ItemRepositoryError, ItemView,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateItemError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ItemRepositoryError> for CreateItemError {
    fn from(err: ItemRepositoryError) -> Self {
        match err {
            ItemRepositoryError::Unavailable(msg) => CreateItemError::Unavailable(msg),
            other => CreateItemError::RepositoryError(other.to_string()),
        }
    }
}

impl From<ItemQueryError> for CreateItemError {
    fn from(err: ItemQueryError) -> Self {
        match err {
            ItemQueryError::Unavailable(msg) => CreateItemError::Unavailable(msg),
            ItemQueryError::DatabaseError(msg) => CreateItemError::RepositoryError(msg),
        }
    }
}

#[async_trait]
pub trait CreateItemUseCase: Send + Sync {
    async fn execute(&self, seller_id: Uuid, draft: ItemDraft)
        -> Result<ItemView, CreateItemError>;
}
