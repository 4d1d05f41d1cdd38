use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::bids::{Column as BidColumn, Entity as BidEntity, Model as BidModel};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::modules::bid::application::domain::entities::BidStatus;
use crate::modules::bid::application::ports::outgoing::{
    BidItemSummary, BidQuery, BidQueryError, BidWithBidder, BidWithItem, BidderSummary,
};
use crate::modules::item::adapter::outgoing::sea_orm_entity::items::{
    Column as ItemColumn, Entity as ItemEntity, Model as ItemModel,
};
use crate::modules::item::application::domain::entities::ItemStatus;
use crate::shared::api::{PageRequest, PageResult};
use crate::shared::db::{classify_db_err, DbFailure};

#[derive(Clone, Debug)]
pub struct BidQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl BidQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn users_by_id(&self, ids: HashSet<Uuid>) -> Result<HashMap<Uuid, UserModel>, BidQueryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(UserEntity::find()
            .filter(UserColumn::Id.is_in(ids))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect())
    }

    async fn with_bidders(&self, models: Vec<BidModel>) -> Result<Vec<BidWithBidder>, BidQueryError> {
        let users = self
            .users_by_id(models.iter().map(|m| m.bidder_id).collect())
            .await?;

        let mut rows = Vec::with_capacity(models.len());
        for model in models {
            let Some(user) = users.get(&model.bidder_id) else {
                tracing::warn!(bid_id = %model.id, bidder_id = %model.bidder_id, "Bidder missing; bid skipped");
                continue;
            };
            rows.push(BidWithBidder {
                bidder: bidder_summary(user),
                bid: model.to_domain().map_err(map_db_err)?,
            });
        }
        Ok(rows)
    }

    /// Joins each bid to its item, and to the item's seller when `with_sellers` is set.
    async fn with_items(
        &self,
        models: Vec<BidModel>,
        with_sellers: bool,
    ) -> Result<Vec<BidWithItem>, BidQueryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids: HashSet<Uuid> = models.iter().map(|m| m.item_id).collect();
        let items: HashMap<Uuid, ItemModel> = ItemEntity::find()
            .filter(ItemColumn::Id.is_in(item_ids))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let sellers = if with_sellers {
            self.users_by_id(items.values().map(|i| i.seller_id).collect())
                .await?
        } else {
            HashMap::new()
        };

        let mut rows = Vec::with_capacity(models.len());
        for model in models {
            let Some(item) = items.get(&model.item_id) else {
                tracing::warn!(bid_id = %model.id, item_id = %model.item_id, "Bid item missing; bid skipped");
                continue;
            };
            rows.push(BidWithItem {
                item: item_summary(item)?,
                seller: sellers.get(&item.seller_id).map(bidder_summary),
                bid: model.to_domain().map_err(map_db_err)?,
            });
        }
        Ok(rows)
    }
}

fn bidder_summary(user: &UserModel) -> BidderSummary {
    BidderSummary {
        id: user.id,
        name: user.name.clone(),
        profile_image: user.profile_image.clone(),
    }
}

fn item_summary(model: &ItemModel) -> Result<BidItemSummary, BidQueryError> {
    let status = model
        .status
        .parse::<ItemStatus>()
        .map_err(|_| BidQueryError::DatabaseError(format!("unexpected status value '{}' in items", model.status)))?;

    Ok(BidItemSummary {
        id: model.id,
        name: model.name.clone(),
        photo: model.photo.clone(),
        current_bid_cents: model.current_bid_cents,
        bid_count: model.bid_count,
        auction_end_date: model.auction_end_date.into(),
        status,
    })
}

#[async_trait]
impl BidQuery for BidQueryPostgres {
    async fn item_summary(&self, item_id: Uuid) -> Result<Option<BidItemSummary>, BidQueryError> {
        let model = ItemEntity::find_by_id(item_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        model.as_ref().map(item_summary).transpose()
    }

    async fn user_name(&self, user_id: Uuid) -> Result<Option<String>, BidQueryError> {
        Ok(UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|user| user.name))
    }

    async fn item_bids(
        &self,
        item_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<BidWithBidder>, BidQueryError> {
        let total = self.count_item_bids(item_id).await?;
        if total == 0 {
            return Ok(PageResult::empty(page));
        }

        let models = BidEntity::find()
            .filter(BidColumn::ItemId.eq(item_id))
            .order_by(BidColumn::AmountCents, Order::Desc)
            .order_by(BidColumn::CreatedAt, Order::Desc)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: self.with_bidders(models).await?,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn item_history(
        &self,
        item_id: Uuid,
        limit: u64,
    ) -> Result<Vec<BidWithBidder>, BidQueryError> {
        let models = BidEntity::find()
            .filter(BidColumn::ItemId.eq(item_id))
            .order_by(BidColumn::CreatedAt, Order::Desc)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.with_bidders(models).await
    }

    async fn count_item_bids(&self, item_id: Uuid) -> Result<u64, BidQueryError> {
        BidEntity::find()
            .filter(BidColumn::ItemId.eq(item_id))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn user_bids(&self, bidder_id: Uuid) -> Result<Vec<BidWithItem>, BidQueryError> {
        let models = BidEntity::find()
            .filter(BidColumn::BidderId.eq(bidder_id))
            .order_by(BidColumn::CreatedAt, Order::Desc)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.with_items(models, false).await
    }

    async fn winning_bids(
        &self,
        bidder_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<BidWithItem>, BidQueryError> {
        let models = BidEntity::find()
            .filter(BidColumn::BidderId.eq(bidder_id))
            .filter(BidColumn::Status.eq(BidStatus::Active.as_str()))
            .order_by(BidColumn::CreatedAt, Order::Desc)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(self
            .with_items(models, true)
            .await?
            .into_iter()
            .filter(|row| row.item.is_biddable(now))
            .collect())
    }
}

fn map_db_err(e: DbErr) -> BidQueryError {
    match classify_db_err(&e) {
        DbFailure::Unavailable => BidQueryError::Unavailable(e.to_string()),
        _ => BidQueryError::DatabaseError(e.to_string()),
    }
}
