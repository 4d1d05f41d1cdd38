use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::user_query::UserQueryError;

#[derive(Debug, thiserror::Error, Clone)]
pub enum FetchUserError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

impl From<UserQueryError> for FetchUserError {
    fn from(e: UserQueryError) -> Self {
        match e {
            UserQueryError::Unavailable(msg) => FetchUserError::Unavailable(msg),
            UserQueryError::DatabaseError(msg) => FetchUserError::QueryError(msg),
        }
    }
}

/// Loads the full account record. Also backs the request authentication extractors.
#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<User, FetchUserError>;
}
