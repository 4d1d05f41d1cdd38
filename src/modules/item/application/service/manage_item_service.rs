use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::item::application::domain::entities::Item;
use crate::modules::item::application::domain::validation::ItemChanges;
use crate::modules::item::application::ports::incoming::use_cases::{
    DeleteItemUseCase, ManageItemError, UpdateItemUseCase,
};
use crate::modules::item::application::ports::outgoing::{
    GuardedWrite, ItemQuery, ItemRepository, ItemView,
};

/// Seller-only edits and deletions, allowed only before the first bid.
pub struct ManageItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> ManageItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }

    async fn load_owned(&self, caller_id: Uuid, item_id: Uuid) -> Result<Item, ManageItemError> {
        let item = self
            .repository
            .find_by_id(item_id)
            .await?
            .ok_or(ManageItemError::NotFound)?;

        if item.seller_id != caller_id {
            warn!(item_id = %item_id, caller_id = %caller_id, "Item change by non-seller rejected");
            return Err(ManageItemError::NotOwner);
        }
        if item.bid_count > 0 {
            return Err(ManageItemError::HasBids);
        }
        Ok(item)
    }
}

fn settle<T>(outcome: GuardedWrite<T>) -> Result<T, ManageItemError> {
    match outcome {
        GuardedWrite::Applied(value) => Ok(value),
        // A bid landed between the ownership check and the write
        GuardedWrite::HasBids => Err(ManageItemError::HasBids),
        GuardedWrite::NotFound => Err(ManageItemError::NotFound),
    }
}

#[async_trait]
impl<Q, R> UpdateItemUseCase for ManageItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    async fn execute(
        &self,
        caller_id: Uuid,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<ItemView, ManageItemError> {
        self.load_owned(caller_id, item_id).await?;

        let updated = settle(self.repository.update_unbid(item_id, changes).await?)?;
        info!(item_id = %updated.id, "Item updated");

        self.query
            .find_view(item_id)
            .await?
            .ok_or(ManageItemError::NotFound)
    }
}

#[async_trait]
impl<Q, R> DeleteItemUseCase for ManageItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    async fn execute(&self, caller_id: Uuid, item_id: Uuid) -> Result<(), ManageItemError> {
        self.load_owned(caller_id, item_id).await?;

        settle(self.repository.delete_unbid(item_id).await?)?;
        info!(item_id = %item_id, "Item deleted");
        Ok(())
    }
}
