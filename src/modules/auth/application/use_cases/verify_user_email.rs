use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::{
    TokenProvider, UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

impl VerifyEmailRequest {
    /// `None` when either part is missing or blank.
    pub fn new(email: Option<&str>, code: Option<&str>) -> Option<Self> {
        let email = email.map(str::trim).filter(|e| !e.is_empty())?;
        let code = code.map(str::trim).filter(|c| !c.is_empty())?;

        Some(Self {
            email: email.to_lowercase(),
            code: code.to_string(),
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyUserEmailError {
    #[error("Invalid or expired verification code")]
    InvalidCode,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

impl From<UserQueryError> for VerifyUserEmailError {
    fn from(e: UserQueryError) -> Self {
        match e {
            UserQueryError::Unavailable(msg) => VerifyUserEmailError::Unavailable(msg),
            UserQueryError::DatabaseError(msg) => VerifyUserEmailError::RepositoryError(msg),
        }
    }
}

impl From<UserRepositoryError> for VerifyUserEmailError {
    fn from(e: UserRepositoryError) -> Self {
        match e {
            // Row vanished between lookup and update
            UserRepositoryError::UserNotFound => VerifyUserEmailError::InvalidCode,
            UserRepositoryError::Unavailable(msg) => VerifyUserEmailError::Unavailable(msg),
            other => VerifyUserEmailError::RepositoryError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerifyEmailOutput {
    pub user: User,
    pub token: String,
}

#[async_trait]
pub trait IVerifyUserEmailUseCase: Send + Sync {
    async fn execute(
        &self,
        request: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutput, VerifyUserEmailError>;
}

pub struct VerifyUserEmailUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q, R> VerifyUserEmailUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            query,
            repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R> IVerifyUserEmailUseCase for VerifyUserEmailUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(
        &self,
        request: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutput, VerifyUserEmailError> {
        let now = Utc::now();

        let user = self
            .query
            .find_by_email(&request.email)
            .await?
            .ok_or(VerifyUserEmailError::InvalidCode)?;

        if !user.verification_code_matches(&request.code, now) {
            tracing::warn!(user_id = %user.id, "Email verification rejected: invalid or expired code");
            return Err(VerifyUserEmailError::InvalidCode);
        }

        let user = self.repository.mark_email_verified(user.id, now).await?;

        let token = self
            .token_provider
            .generate_access_token(user.id, true)
            .map_err(|e| VerifyUserEmailError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Email verified");

        Ok(VerifyEmailOutput { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::sample_user;
    use crate::tests::support::auth_helper::test_token_provider;
    use crate::tests::support::mocks::{MockUserQueryImpl, MockUserRepositoryImpl};
    use chrono::Duration;

    fn use_case(
        query: MockUserQueryImpl,
        repository: MockUserRepositoryImpl,
    ) -> VerifyUserEmailUseCase<MockUserQueryImpl, MockUserRepositoryImpl> {
        VerifyUserEmailUseCase::new(query, repository, Arc::new(test_token_provider()))
    }

    fn request(code: &str) -> VerifyEmailRequest {
        VerifyEmailRequest::new(Some("jane@example.com"), Some(code)).unwrap()
    }

    #[test]
    fn request_requires_both_fields() {
        assert!(VerifyEmailRequest::new(None, Some("123456")).is_none());
        assert!(VerifyEmailRequest::new(Some("jane@example.com"), Some("  ")).is_none());
        assert_eq!(
            VerifyEmailRequest::new(Some("Jane@Example.com"), Some("123456"))
                .unwrap()
                .email,
            "jane@example.com"
        );
    }

    #[tokio::test]
    async fn matching_code_verifies_and_issues_verified_token() {
        let user = sample_user();
        let user_id = user.id;

        let mut query = MockUserQueryImpl::new();
        query
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut repository = MockUserRepositoryImpl::new();
        repository
            .expect_mark_email_verified()
            .withf(move |id, _| *id == user_id)
            .returning(|id, _| {
                let mut verified = sample_user();
                verified.id = id;
                verified.is_email_verified = true;
                verified.email_verification_code = None;
                Ok(verified)
            });

        let output = use_case(query, repository)
            .execute(request("123456"))
            .await
            .unwrap();

        assert!(output.user.is_email_verified);
        let claims = test_token_provider().verify_access_token(&output.token).unwrap();
        assert!(claims.is_verified);
    }

    #[tokio::test]
    async fn wrong_code_is_rejected_without_update() {
        let user = sample_user();
        let mut query = MockUserQueryImpl::new();
        query
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut repository = MockUserRepositoryImpl::new();
        repository.expect_mark_email_verified().never();

        let result = use_case(query, repository).execute(request("999999")).await;
        assert!(matches!(result, Err(VerifyUserEmailError::InvalidCode)));
    }

    #[tokio::test]
    async fn expired_code_is_rejected() {
        let mut user = sample_user();
        user.email_verification_expires = Some(Utc::now() - Duration::seconds(1));

        let mut query = MockUserQueryImpl::new();
        query
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = use_case(query, MockUserRepositoryImpl::new())
            .execute(request("123456"))
            .await;
        assert!(matches!(result, Err(VerifyUserEmailError::InvalidCode)));
    }

    #[tokio::test]
    async fn unknown_email_is_indistinguishable_from_bad_code() {
        let mut query = MockUserQueryImpl::new();
        query.expect_find_by_email().returning(|_| Ok(None));

        let result = use_case(query, MockUserRepositoryImpl::new())
            .execute(request("123456"))
            .await;
        assert!(matches!(result, Err(VerifyUserEmailError::InvalidCode)));
    }
}
