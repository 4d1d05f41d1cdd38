use sea_orm::entity::prelude::*;

use crate::modules::bid::application::domain::entities::{Bid, BidStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub bidder_id: Uuid,
    pub amount_cents: i64,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(self) -> Result<Bid, DbErr> {
        let status = self
            .status
            .parse::<BidStatus>()
            .map_err(|_| DbErr::Type(format!("unexpected status value '{}' in bids", self.status)))?;

        Ok(Bid {
            id: self.id,
            item_id: self.item_id,
            bidder_id: self.bidder_id,
            amount_cents: self.amount_cents,
            status,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        })
    }
}

#[cfg(test)]
pub(crate) fn model_from(bid: &Bid) -> Model {
    Model {
        id: bid.id,
        item_id: bid.item_id,
        bidder_id: bid.bidder_id,
        amount_cents: bid.amount_cents,
        status: bid.status.as_str().to_string(),
        created_at: bid.created_at.fixed_offset(),
        updated_at: bid.updated_at.fixed_offset(),
    }
}
