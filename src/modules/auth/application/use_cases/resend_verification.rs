use async_trait::async_trait;
use chrono::Utc;

use crate::modules::auth::application::domain::entities::{User, VerificationCode};
use crate::modules::auth::application::ports::outgoing::{
    UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<UserQueryError> for ResendVerificationError {
    fn from(e: UserQueryError) -> Self {
        match e {
            UserQueryError::Unavailable(msg) => ResendVerificationError::Unavailable(msg),
            UserQueryError::DatabaseError(msg) => ResendVerificationError::RepositoryError(msg),
        }
    }
}

impl From<UserRepositoryError> for ResendVerificationError {
    fn from(e: UserRepositoryError) -> Self {
        match e {
            UserRepositoryError::UserNotFound => ResendVerificationError::UserNotFound,
            UserRepositoryError::Unavailable(msg) => ResendVerificationError::Unavailable(msg),
            other => ResendVerificationError::RepositoryError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResendVerificationOutput {
    pub user: User,
    pub verification_code: String,
}

#[async_trait]
pub trait IResendVerificationUseCase: Send + Sync {
    async fn execute(&self, email: &str)
        -> Result<ResendVerificationOutput, ResendVerificationError>;
}

/// Issues a fresh code for an unverified account, replacing the previous one.
pub struct ResendVerificationUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> ResendVerificationUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> IResendVerificationUseCase for ResendVerificationUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(
        &self,
        email: &str,
    ) -> Result<ResendVerificationOutput, ResendVerificationError> {
        let user = self
            .query
            .find_by_email(email)
            .await?
            .ok_or(ResendVerificationError::UserNotFound)?;

        if user.is_email_verified {
            return Err(ResendVerificationError::AlreadyVerified);
        }

        let verification = VerificationCode::generate(Utc::now());
        let verification_code = verification.code.clone();
        self.repository
            .set_verification_code(user.id, verification)
            .await?;

        tracing::info!(user_id = %user.id, "Verification code reissued");

        Ok(ResendVerificationOutput {
            user,
            verification_code,
        })
    }
}
