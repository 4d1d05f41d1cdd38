use sea_orm::entity::prelude::*;

use crate::modules::auth::application::domain::entities::User;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub is_email_verified: bool,
    pub email_verification_code: Option<String>,
    pub email_verification_expires: Option<DateTimeWithTimeZone>,
    pub total_spent_cents: i64,
    pub items_sold: i32,
    pub successful_bids: i32,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub member_since: DateTimeWithTimeZone,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            profile_image: self.profile_image,
            phone: self.phone,
            address: self.address,
            bio: self.bio,
            is_email_verified: self.is_email_verified,
            email_verification_code: self.email_verification_code,
            email_verification_expires: self.email_verification_expires.map(Into::into),
            total_spent_cents: self.total_spent_cents,
            items_sold: self.items_sold,
            successful_bids: self.successful_bids,
            rating: self.rating,
            member_since: self.member_since.into(),
            is_active: self.is_active,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

#[cfg(test)]
pub(crate) fn model_from(user: &User) -> Model {
    Model {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        profile_image: user.profile_image.clone(),
        phone: user.phone.clone(),
        address: user.address.clone(),
        bio: user.bio.clone(),
        is_email_verified: user.is_email_verified,
        email_verification_code: user.email_verification_code.clone(),
        email_verification_expires: user.email_verification_expires.map(Into::into),
        total_spent_cents: user.total_spent_cents,
        items_sold: user.items_sold,
        successful_bids: user.successful_bids,
        rating: user.rating,
        member_since: user.member_since.into(),
        is_active: user.is_active,
        created_at: user.created_at.into(),
        updated_at: user.updated_at.into(),
    }
}
