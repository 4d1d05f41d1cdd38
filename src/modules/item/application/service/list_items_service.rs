use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::modules::item::application::ports::incoming::use_cases::{
    BrowseItemsUseCase, ListItemsError, ListItemsRequest, ListItemsUseCase,
};
use crate::modules::item::application::ports::outgoing::{ItemQuery, ItemView};
use crate::shared::api::PageResult;

const STOREFRONT_LIMIT: u64 = 10;
const ENDING_SOON_WINDOW_HOURS: i64 = 24;

// ============================================================================
// Service Implementation
// ============================================================================

pub struct ListItemsService<Q>
where
    Q: ItemQuery,
{
    query: Q,
}

impl<Q> ListItemsService<Q>
where
    Q: ItemQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListItemsUseCase for ListItemsService<Q>
where
    Q: ItemQuery,
{
    async fn execute(
        &self,
        request: ListItemsRequest,
    ) -> Result<PageResult<ItemView>, ListItemsError> {
        self.query
            .list_biddable(request.filter, request.sort, request.page, Utc::now())
            .await
            .map_err(ListItemsError::from)
    }
}

#[async_trait]
impl<Q> BrowseItemsUseCase for ListItemsService<Q>
where
    Q: ItemQuery,
{
    async fn featured(&self) -> Result<Vec<ItemView>, ListItemsError> {
        Ok(self.query.featured(Utc::now(), STOREFRONT_LIMIT).await?)
    }

    async fn ending_soon(&self) -> Result<Vec<ItemView>, ListItemsError> {
        Ok(self
            .query
            .ending_soon(
                Utc::now(),
                Duration::hours(ENDING_SOON_WINDOW_HOURS),
                STOREFRONT_LIMIT,
            )
            .await?)
    }
}
