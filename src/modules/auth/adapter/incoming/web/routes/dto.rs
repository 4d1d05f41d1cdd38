use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::shared::money::cents_to_dollars;

/// Public view of an account returned right after signup.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@campus.edu")]
    pub email: String,
    pub profile_image: String,
    #[schema(example = false)]
    pub is_email_verified: bool,
    pub member_since: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
            is_email_verified: user.is_email_verified,
            member_since: user.member_since,
        }
    }
}

/// Full account profile. Credentials and verification codes are never included.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@campus.edu")]
    pub email: String,
    pub profile_image: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub is_email_verified: bool,
    /// Dollars
    #[schema(example = 125.5)]
    pub total_spent: f64,
    pub items_sold: i32,
    pub successful_bids: i32,
    #[schema(example = 5.0)]
    pub rating: f64,
    pub member_since: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            bio: user.bio.clone(),
            is_email_verified: user.is_email_verified,
            total_spent: cents_to_dollars(user.total_spent_cents),
            items_sold: user.items_sold,
            successful_bids: user.successful_bids,
            rating: user.rating,
            member_since: user.member_since,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
