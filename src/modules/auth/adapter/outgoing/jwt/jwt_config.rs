use crate::config::{parse_or, required, ConfigError};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    /// Seconds until an access token expires.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// Seven days, the lifetime clients expect from a single signin.
    pub const DEFAULT_ACCESS_EXPIRY: i64 = 604_800;

    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = required("JWT_SECRET")?;

        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET".to_string(),
                reason: "must be at least 32 characters long for HS256".to_string(),
            });
        }

        let access_token_expiry = parse_or("JWT_ACCESS_EXPIRY", Self::DEFAULT_ACCESS_EXPIRY)?;
        if access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY".to_string(),
                reason: "must be a positive number of seconds".to_string(),
            });
        }

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "AuctionHub".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
