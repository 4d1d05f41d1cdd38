use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::item::application::domain::validation::ItemDraft;
use crate::modules::item::application::ports::incoming::use_cases::{
    CreateItemError, CreateItemUseCase,
};
use crate::modules::item::application::ports::outgoing::{ItemQuery, ItemRepository, ItemView};

pub struct CreateItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> CreateItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> CreateItemUseCase for CreateItemService<Q, R>
where
    Q: ItemQuery,
    R: ItemRepository,
{
    async fn execute(&self, seller_id: Uuid, draft: ItemDraft) -> Result<ItemView, CreateItemError> {
        let item = self.repository.create(seller_id, draft).await?;
        info!(item_id = %item.id, seller_id = %seller_id, "Item listed");

        self.query
            .find_view(item.id)
            .await?
            .ok_or_else(|| CreateItemError::RepositoryError("Created item not readable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::item::application::domain::entities::{sample_item, Category, Condition};
    use crate::modules::item::application::ports::outgoing::item_query::view_of;
    use crate::modules::item::application::ports::outgoing::ItemRepositoryError;
    use crate::tests::support::mocks::{MockItemQueryImpl, MockItemRepositoryImpl};
    use chrono::{Duration, Utc};

    fn draft() -> ItemDraft {
        ItemDraft {
            name: "Mini fridge".to_string(),
            description: "Fits under a dorm desk, works great".to_string(),
            category: Category::Electronics,
            starting_price_cents: 4_000,
            auction_end_date: Utc::now() + Duration::days(2),
            photo: "https://img.example.com/fridge.jpg".to_string(),
            condition: Condition::LikeNew,
            location: "North Hall".to_string(),
            min_bid_increment_cents: 200,
        }
    }

    #[tokio::test]
    async fn seller_is_the_caller() {
        let seller_id = Uuid::new_v4();
        let item = sample_item(seller_id);
        let returned = item.clone();

        let mut repository = MockItemRepositoryImpl::new();
        repository
            .expect_create()
            .withf(move |seller, d| *seller == seller_id && d.name == "Mini fridge")
            .returning(move |_, _| Ok(returned.clone()));

        let mut query = MockItemQueryImpl::new();
        query
            .expect_find_view()
            .returning(move |_| Ok(Some(view_of(item.clone()))));

        let view = CreateItemService::new(query, repository)
            .execute(seller_id, draft())
            .await
            .unwrap();
        assert_eq!(view.seller.id, seller_id);
    }

    #[tokio::test]
    async fn repository_outage_is_unavailable() {
        let mut repository = MockItemRepositoryImpl::new();
        repository
            .expect_create()
            .returning(|_, _| Err(ItemRepositoryError::Unavailable("refused".into())));

        let result = CreateItemService::new(MockItemQueryImpl::new(), repository)
            .execute(Uuid::new_v4(), draft())
            .await;
        assert!(matches!(result, Err(CreateItemError::Unavailable(_))));
    }
}
