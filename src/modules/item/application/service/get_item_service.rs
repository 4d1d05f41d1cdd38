use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::item::application::ports::incoming::use_cases::{GetItemError, GetItemUseCase};
use crate::modules::item::application::ports::outgoing::{ItemQuery, ItemRepository, ItemView};

pub struct GetItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> GetItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> GetItemUseCase for GetItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    async fn execute(&self, item_id: Uuid) -> Result<ItemView, GetItemError> {
        // The counter bump doubles as the existence check
        if !self.repository.increment_views(item_id).await? {
            return Err(GetItemError::NotFound);
        }

        self.query
            .find_view(item_id)
            .await?
            .ok_or(GetItemError::NotFound)
    }
}
