use async_trait::async_trait;
use chrono::Utc;
use email_address::EmailAddress;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, User, VerificationCode};
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};
use crate::shared::validation::{FieldError, Violations};

// ========================= Signup Request =========================

/// Signup input that has passed field validation. Name is trimmed, email lowercased.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

impl SignupRequest {
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, Vec<FieldError>> {
        let mut violations = Violations::new();

        let name = name.trim();
        let name_len = name.chars().count();
        if !(2..=50).contains(&name_len) {
            violations.push_with_value("name", "Name must be between 2 and 50 characters", name);
        } else if !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
            violations.push_with_value("name", "Name can only contain letters and spaces", name);
        }

        let email = email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            violations.push_with_value("email", "Please provide a valid email address", &email);
        }

        // Password values are never echoed back
        let password_len = password.chars().count();
        if !(6..=128).contains(&password_len) {
            violations.push("password", "Password must be between 6 and 128 characters");
        } else if !is_strong_password(password) {
            violations.push(
                "password",
                "Password must contain at least one uppercase letter, one lowercase letter, and one number",
            );
        }

        violations.finish(Self {
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

// ========================= Errors =========================

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateUserError {
    #[error("User already exists with this email")]
    EmailAlreadyExists,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

impl From<UserQueryError> for CreateUserError {
    fn from(e: UserQueryError) -> Self {
        match e {
            UserQueryError::Unavailable(msg) => CreateUserError::Unavailable(msg),
            UserQueryError::DatabaseError(msg) => CreateUserError::RepositoryError(msg),
        }
    }
}

impl From<UserRepositoryError> for CreateUserError {
    fn from(e: UserRepositoryError) -> Self {
        match e {
            UserRepositoryError::EmailAlreadyExists => CreateUserError::EmailAlreadyExists,
            UserRepositoryError::Unavailable(msg) => CreateUserError::Unavailable(msg),
            other => CreateUserError::RepositoryError(other.to_string()),
        }
    }
}

// ========================= Output =========================

#[derive(Debug, Clone)]
pub struct CreateUserOutput {
    pub user: User,
    pub token: String,
    /// Plain code, handed to the mailer and optionally echoed to the client.
    pub verification_code: String,
}

// ========================= Use Case =========================

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, request: SignupRequest) -> Result<CreateUserOutput, CreateUserError>;
}

pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q, R> CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, request: SignupRequest) -> Result<CreateUserOutput, CreateUserError> {
        if self.query.find_by_email(request.email()).await?.is_some() {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let verification = VerificationCode::generate(Utc::now());
        let verification_code = verification.code.clone();

        // The unique index still wins a race between the lookup and the insert
        let user = self
            .repository
            .create_user(NewUser {
                id: Uuid::new_v4(),
                name: request.name().to_string(),
                email: request.email().to_string(),
                password_hash,
                verification,
            })
            .await?;

        let token = self
            .token_provider
            .generate_access_token(user.id, user.is_email_verified)
            .map_err(|e| CreateUserError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User account created");

        Ok(CreateUserOutput {
            user,
            token,
            verification_code,
        })
    }
}
