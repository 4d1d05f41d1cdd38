use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::items::{ActiveModel as ItemActiveModel, Column, Entity as ItemEntity};
use crate::modules::item::application::domain::entities::{Item, ItemStatus};
use crate::modules::item::application::domain::validation::{ItemChanges, ItemDraft};
use crate::modules::item::application::ports::outgoing::{
    GuardedWrite, ItemRepository, ItemRepositoryError,
};
use crate::shared::db::{classify_db_err, DbFailure};

#[derive(Clone, Debug)]
pub struct ItemRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ItemRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// A guarded write touched nothing: tell a missing row from one that has bids.
    async fn explain_miss<T>(&self, item_id: Uuid) -> Result<GuardedWrite<T>, ItemRepositoryError> {
        match self.find_by_id(item_id).await? {
            Some(_) => Ok(GuardedWrite::HasBids),
            None => Ok(GuardedWrite::NotFound),
        }
    }
}

fn changes_to_active_model(changes: ItemChanges) -> ItemActiveModel {
    let mut model = ItemActiveModel {
        updated_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };

    if let Some(name) = changes.name {
        model.name = Set(name);
    }
    if let Some(description) = changes.description {
        model.description = Set(description);
    }
    if let Some(category) = changes.category {
        model.category = Set(category.as_str().to_string());
    }
    if let Some(price) = changes.starting_price_cents {
        // No bids yet, so the current bid tracks the starting price
        model.starting_price_cents = Set(price);
        model.current_bid_cents = Set(price);
    }
    if let Some(end) = changes.auction_end_date {
        model.auction_end_date = Set(end.fixed_offset());
    }
    if let Some(photo) = changes.photo {
        model.photo = Set(photo);
    }
    if let Some(condition) = changes.condition {
        model.condition = Set(condition.as_str().to_string());
    }
    if let Some(location) = changes.location {
        model.location = Set(location);
    }
    if let Some(increment) = changes.min_bid_increment_cents {
        model.min_bid_increment_cents = Set(increment);
    }

    model
}

#[async_trait]
impl ItemRepository for ItemRepositoryPostgres {
    async fn create(&self, seller_id: Uuid, draft: ItemDraft) -> Result<Item, ItemRepositoryError> {
        let now = Utc::now().fixed_offset();
        let active_item = ItemActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            description: Set(draft.description),
            category: Set(draft.category.as_str().to_string()),
            starting_price_cents: Set(draft.starting_price_cents),
            current_bid_cents: Set(draft.starting_price_cents),
            bid_count: Set(0),
            min_bid_increment_cents: Set(draft.min_bid_increment_cents),
            photo: Set(draft.photo),
            seller_id: Set(seller_id),
            auction_start_date: Set(now),
            auction_end_date: Set(draft.auction_end_date.fixed_offset()),
            status: Set(ItemStatus::Active.as_str().to_string()),
            winner_id: Set(None),
            winning_bid_cents: Set(None),
            views: Set(0),
            is_featured: Set(false),
            condition: Set(draft.condition.as_str().to_string()),
            location: Set(draft.location),
            created_at: Set(now),
            updated_at: Set(now),
            settlement_failures: Set(0),
            settlement_retry_at: Set(None),
        };

        let inserted = active_item.insert(&*self.db).await.map_err(map_db_err)?;
        inserted.to_domain().map_err(map_db_err)
    }

    async fn find_by_id(&self, item_id: Uuid) -> Result<Option<Item>, ItemRepositoryError> {
        ItemEntity::find_by_id(item_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|model| model.to_domain().map_err(map_db_err))
            .transpose()
    }

    async fn increment_views(&self, item_id: Uuid) -> Result<bool, ItemRepositoryError> {
        let result = ItemEntity::update_many()
            .col_expr(Column::Views, Expr::col(Column::Views).add(1))
            .filter(Column::Id.eq(item_id))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn update_unbid(
        &self,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<GuardedWrite<Item>, ItemRepositoryError> {
        let updated = ItemEntity::update_many()
            .set(changes_to_active_model(changes))
            .filter(Column::Id.eq(item_id))
            .filter(Column::BidCount.eq(0))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        match updated.into_iter().next() {
            Some(model) => Ok(GuardedWrite::Applied(model.to_domain().map_err(map_db_err)?)),
            None => self.explain_miss(item_id).await,
        }
    }

    async fn delete_unbid(&self, item_id: Uuid) -> Result<GuardedWrite<()>, ItemRepositoryError> {
        let result = ItemEntity::delete_many()
            .filter(Column::Id.eq(item_id))
            .filter(Column::BidCount.eq(0))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected > 0 {
            return Ok(GuardedWrite::Applied(()));
        }
        self.explain_miss(item_id).await
    }
}

fn map_db_err(e: DbErr) -> ItemRepositoryError {
    match classify_db_err(&e) {
        DbFailure::Unavailable => ItemRepositoryError::Unavailable(e.to_string()),
        _ => ItemRepositoryError::DatabaseError(e.to_string()),
    }
}
