use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, UserQuery, UserQueryError,
};
use crate::shared::validation::{FieldError, Violations};

// ========================= Login Request =========================

#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Result<Self, Vec<FieldError>> {
        let mut violations = Violations::new();

        let email = email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            violations.push_with_value("email", "Please provide a valid email address", &email);
        }
        if password.is_empty() {
            violations.push("password", "Password is required");
        }

        violations.finish(Self {
            email,
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ========================= Login Error =========================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Your account has been deactivated")]
    AccountDeactivated,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

impl From<UserQueryError> for LoginError {
    fn from(e: UserQueryError) -> Self {
        match e {
            UserQueryError::Unavailable(msg) => LoginError::Unavailable(msg),
            UserQueryError::DatabaseError(msg) => LoginError::QueryError(msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

// ========================= Login Use Case =========================

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginOutput, LoginError>;
}

pub struct LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginOutput, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        if !user.is_active {
            return Err(LoginError::AccountDeactivated);
        }

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            tracing::warn!(user_id = %user.id, "Signin rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .token_provider
            .generate_access_token(user.id, user.is_email_verified)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(LoginOutput { user, token })
    }
}
