use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::ports::outgoing::{HashError, PasswordHasher, TokenProvider};
use actix_web::web;

pub fn test_token_provider() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        issuer: "AuctionHub".to_string(),
        secret_key: "test_secret_key_that_is_long_enough_for_hs256".to_string(),
        access_token_expiry: 3600,
    })
}

/// The provider as the auth extractor looks it up in app data.
pub fn test_token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(test_token_provider());
    web::Data::new(provider)
}

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: Uuid, is_verified: bool) -> String {
    let token = test_token_provider()
        .generate_access_token(user_id, is_verified)
        .expect("test token");
    format!("Bearer {token}")
}

/// Prefixes instead of hashing, so assertions can read the stored value.
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}
