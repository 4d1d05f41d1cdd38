use sea_orm::entity::prelude::*;

use crate::modules::item::application::domain::entities::{Category, Condition, Item, ItemStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub starting_price_cents: i64,
    pub current_bid_cents: i64,
    pub bid_count: i32,
    pub min_bid_increment_cents: i64,
    pub photo: String,
    pub seller_id: Uuid,
    pub auction_start_date: DateTimeWithTimeZone,
    pub auction_end_date: DateTimeWithTimeZone,
    pub status: String,
    pub winner_id: Option<Uuid>,
    pub winning_bid_cents: Option<i64>,
    pub views: i32,
    pub is_featured: bool,
    pub condition: String,
    pub location: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// Consecutive failed settlement attempts.
    pub settlement_failures: i32,
    pub settlement_retry_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn unknown(column: &str, value: &str) -> DbErr {
    DbErr::Type(format!("unexpected {column} value '{value}' in items"))
}

impl Model {
    /// Fails only if a text column holds a value outside its check constraint.
    pub fn to_domain(self) -> Result<Item, DbErr> {
        let category = self
            .category
            .parse::<Category>()
            .map_err(|_| unknown("category", &self.category))?;
        let status = self
            .status
            .parse::<ItemStatus>()
            .map_err(|_| unknown("status", &self.status))?;
        let condition = self
            .condition
            .parse::<Condition>()
            .map_err(|_| unknown("condition", &self.condition))?;

        Ok(Item {
            id: self.id,
            name: self.name,
            description: self.description,
            category,
            starting_price_cents: self.starting_price_cents,
            current_bid_cents: self.current_bid_cents,
            bid_count: self.bid_count,
            min_bid_increment_cents: self.min_bid_increment_cents,
            photo: self.photo,
            seller_id: self.seller_id,
            auction_start_date: self.auction_start_date.into(),
            auction_end_date: self.auction_end_date.into(),
            status,
            winner_id: self.winner_id,
            winning_bid_cents: self.winning_bid_cents,
            views: self.views,
            is_featured: self.is_featured,
            condition,
            location: self.location,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        })
    }
}

#[cfg(test)]
pub(crate) fn model_from(item: &Item) -> Model {
    Model {
        id: item.id,
        name: item.name.clone(),
        description: item.description.clone(),
        category: item.category.as_str().to_string(),
        starting_price_cents: item.starting_price_cents,
        current_bid_cents: item.current_bid_cents,
        bid_count: item.bid_count,
        min_bid_increment_cents: item.min_bid_increment_cents,
        photo: item.photo.clone(),
        seller_id: item.seller_id,
        auction_start_date: item.auction_start_date.fixed_offset(),
        auction_end_date: item.auction_end_date.fixed_offset(),
        status: item.status.as_str().to_string(),
        winner_id: item.winner_id,
        winning_bid_cents: item.winning_bid_cents,
        views: item.views,
        is_featured: item.is_featured,
        condition: item.condition.as_str().to_string(),
        location: item.location.clone(),
        created_at: item.created_at.fixed_offset(),
        updated_at: item.updated_at.fixed_offset(),
        settlement_failures: 0,
        settlement_retry_at: None,
    }
}
