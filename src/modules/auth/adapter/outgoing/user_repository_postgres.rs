use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{
    NewUser, User, VerificationCode, DEFAULT_PROFILE_IMAGE,
};
use crate::modules::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};
use crate::shared::db::{classify_db_err, DbFailure};

use super::sea_orm_entity::users::{ActiveModel as UserActiveModel, Column, Entity as UserEntity};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let now = Utc::now().fixed_offset();
        let active_user = UserActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email.to_lowercase()),
            password_hash: Set(user.password_hash),
            profile_image: Set(DEFAULT_PROFILE_IMAGE.to_string()),
            phone: Set(None),
            address: Set(None),
            bio: Set(None),
            is_email_verified: Set(false),
            email_verification_code: Set(Some(user.verification.code)),
            email_verification_expires: Set(Some(user.verification.expires_at.fixed_offset())),
            total_spent_cents: Set(0),
            items_sold: Set(0),
            successful_bids: Set(0),
            rating: Set(5.0),
            member_since: Set(now),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = active_user.insert(&*self.db).await.map_err(map_db_err)?;

        Ok(inserted.to_domain())
    }

    async fn set_verification_code(
        &self,
        user_id: Uuid,
        verification: VerificationCode,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .set(UserActiveModel {
                email_verification_code: Set(Some(verification.code)),
                email_verification_expires: Set(Some(verification.expires_at.fixed_offset())),
                updated_at: Set(Utc::now().fixed_offset()),
                ..Default::default()
            })
            .filter(Column::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }

        Ok(())
    }

    async fn mark_email_verified(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<User, UserRepositoryError> {
        let updated = UserEntity::update_many()
            .set(UserActiveModel {
                is_email_verified: Set(true),
                email_verification_code: Set(None),
                email_verification_expires: Set(None),
                updated_at: Set(at.fixed_offset()),
                ..Default::default()
            })
            .filter(Column::Id.eq(user_id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        updated
            .into_iter()
            .next()
            .map(|model| model.to_domain())
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

fn map_db_err(e: DbErr) -> UserRepositoryError {
    match classify_db_err(&e) {
        DbFailure::UniqueViolation => UserRepositoryError::EmailAlreadyExists,
        DbFailure::Unavailable => UserRepositoryError::Unavailable(e.to_string()),
        DbFailure::Contention | DbFailure::Other => UserRepositoryError::DatabaseError(e.to_string()),
    }
}
