use async_trait::async_trait;

use crate::modules::item::application::ports::outgoing::ItemView;
use crate::modules::item::application::ports::incoming::use_cases::ListItemsError;

/// Curated storefront lists, each capped at ten items.
#[async_trait]
pub trait BrowseItemsUseCase: Send + Sync {
    async fn featured(&self) -> Result<Vec<ItemView>, ListItemsError>;

    /// Biddable items closing within the next 24 hours.
    async fn ending_soon(&self) -> Result<Vec<ItemView>, ListItemsError>;
}
