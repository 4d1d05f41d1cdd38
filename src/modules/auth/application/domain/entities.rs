use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

pub const DEFAULT_PROFILE_IMAGE: &str = "https://via.placeholder.com/100x100?text=User";

/// Minutes a freshly issued email verification code stays valid.
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub is_email_verified: bool,
    pub email_verification_code: Option<String>,
    pub email_verification_expires: Option<DateTime<Utc>>,
    pub total_spent_cents: i64,
    pub items_sold: i32,
    pub successful_bids: i32,
    pub rating: f64,
    pub member_since: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A stored code matches only until its expiry passes.
    pub fn verification_code_matches(&self, code: &str, now: DateTime<Utc>) -> bool {
        match (&self.email_verification_code, self.email_verification_expires) {
            (Some(stored), Some(expires)) => stored == code && expires > now,
            _ => false,
        }
    }
}

/// Data needed to insert a user row. Everything else takes its column default.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub verification: VerificationCode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Six random digits, valid for ten minutes from `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        Self {
            code: code.to_string(),
            expires_at: now + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=4096,t=3,p=1$c2FsdA$aGFzaA".to_string(),
        profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
        phone: None,
        address: None,
        bio: None,
        is_email_verified: false,
        email_verification_code: Some("123456".to_string()),
        email_verification_expires: Some(now + Duration::minutes(10)),
        total_spent_cents: 0,
        items_sold: 0,
        successful_bids: 0,
        rating: 5.0,
        member_since: now,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
