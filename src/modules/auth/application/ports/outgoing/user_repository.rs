use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, User, VerificationCode};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists with this email")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Replaces any pending code on the user.
    async fn set_verification_code(
        &self,
        user_id: Uuid,
        verification: VerificationCode,
    ) -> Result<(), UserRepositoryError>;

    /// Marks the email verified and clears the pending code in one update.
    async fn mark_email_verified(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<User, UserRepositoryError>;
}
