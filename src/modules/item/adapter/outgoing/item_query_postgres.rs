use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::items::{Column, Entity as ItemEntity, Model as ItemModel};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::modules::item::application::domain::entities::ItemStatus;
use crate::modules::item::application::ports::outgoing::{
    ItemListFilter, ItemQuery, ItemQueryError, ItemSort, ItemView, SellerSummary, WinnerSummary,
};
use crate::shared::api::{PageRequest, PageResult};
use crate::shared::db::{classify_db_err, DbFailure};

#[derive(Clone, Debug)]
pub struct ItemQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ItemQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attaches seller and winner summaries, loading all referenced users in one query.
    async fn into_views(&self, models: Vec<ItemModel>) -> Result<Vec<ItemView>, ItemQueryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: HashSet<Uuid> = models
            .iter()
            .flat_map(|m| std::iter::once(m.seller_id).chain(m.winner_id))
            .collect();

        let users: HashMap<Uuid, UserModel> = UserEntity::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let mut views = Vec::with_capacity(models.len());
        for model in models {
            let Some(seller) = users.get(&model.seller_id) else {
                tracing::warn!(item_id = %model.id, seller_id = %model.seller_id, "Item seller missing; skipped");
                continue;
            };
            let winner = model
                .winner_id
                .and_then(|id| users.get(&id))
                .map(|user| WinnerSummary {
                    id: user.id,
                    name: user.name.clone(),
                });
            let seller = SellerSummary {
                id: seller.id,
                name: seller.name.clone(),
                profile_image: seller.profile_image.clone(),
                rating: seller.rating,
                member_since: seller.member_since.into(),
            };

            views.push(ItemView {
                item: model.to_domain().map_err(map_db_err)?,
                seller,
                winner,
            });
        }

        Ok(views)
    }
}

fn biddable(now: DateTime<Utc>) -> Select<ItemEntity> {
    ItemEntity::find()
        .filter(Column::Status.eq(ItemStatus::Active.as_str()))
        .filter(Column::AuctionEndDate.gt(now.fixed_offset()))
}

fn escape_like(term: &str) -> String {
    term.to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `LIKE` pattern matching `term` literally anywhere, for use against lowercased text.
fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\')
}

fn apply_filter(select: Select<ItemEntity>, filter: &ItemListFilter) -> Select<ItemEntity> {
    let mut select = select;
    if let Some(category) = filter.category {
        select = select.filter(Column::Category.eq(category.as_str()));
    }
    if let Some(search) = filter.search.as_deref() {
        select = select.filter(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(contains_pattern(search)))
                .add(
                    Expr::expr(Func::lower(Expr::col(Column::Description)))
                        .like(contains_pattern(search)),
                ),
        );
    }
    select
}

fn apply_sort(select: Select<ItemEntity>, sort: ItemSort) -> Select<ItemEntity> {
    let select = match sort {
        ItemSort::Newest => select.order_by(Column::CreatedAt, Order::Desc),
        ItemSort::Oldest => select.order_by(Column::CreatedAt, Order::Asc),
        ItemSort::PriceLow => select.order_by(Column::CurrentBidCents, Order::Asc),
        ItemSort::PriceHigh => select.order_by(Column::CurrentBidCents, Order::Desc),
        ItemSort::EndingSoon => select.order_by(Column::AuctionEndDate, Order::Asc),
        ItemSort::MostBids => select.order_by(Column::BidCount, Order::Desc),
    };
    // Stable pages when the primary key ties
    select.order_by(Column::Id, Order::Asc)
}

#[async_trait]
impl ItemQuery for ItemQueryPostgres {
    async fn list_biddable(
        &self,
        filter: ItemListFilter,
        sort: ItemSort,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<PageResult<ItemView>, ItemQueryError> {
        let select = apply_filter(biddable(now), &filter);

        let total = select.clone().count(&*self.db).await.map_err(map_db_err)?;
        if total == 0 {
            return Ok(PageResult::empty(page));
        }

        let models = apply_sort(select, sort)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: self.into_views(models).await?,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn find_view(&self, item_id: Uuid) -> Result<Option<ItemView>, ItemQueryError> {
        let Some(model) = ItemEntity::find_by_id(item_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(self.into_views(vec![model]).await?.into_iter().next())
    }

    async fn featured(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<ItemView>, ItemQueryError> {
        let models = biddable(now)
            .filter(Column::IsFeatured.eq(true))
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.into_views(models).await
    }

    async fn ending_soon(
        &self,
        now: DateTime<Utc>,
        window: Duration,
        limit: u64,
    ) -> Result<Vec<ItemView>, ItemQueryError> {
        let models = biddable(now)
            .filter(Column::AuctionEndDate.lte((now + window).fixed_offset()))
            .order_by(Column::AuctionEndDate, Order::Asc)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.into_views(models).await
    }
}

fn map_db_err(e: DbErr) -> ItemQueryError {
    match classify_db_err(&e) {
        DbFailure::Unavailable => ItemQueryError::Unavailable(e.to_string()),
        _ => ItemQueryError::DatabaseError(e.to_string()),
    }
}
