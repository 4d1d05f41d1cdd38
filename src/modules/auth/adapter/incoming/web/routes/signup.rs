use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::dto::UserSummary;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::create_user::{CreateUserError, SignupRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Request body for account signup
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequestDto {
    /// Letters and spaces, 2 to 50 characters
    #[schema(example = "Jane Doe")]
    #[serde(default)]
    pub name: String,

    #[schema(example = "jane@campus.edu")]
    #[serde(default)]
    pub email: String,

    /// 6 to 128 characters with a lowercase letter, an uppercase letter and a digit
    #[schema(example = "Secret123")]
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    user: UserSummary,
    token: String,
    /// Only present when codes are exposed (development)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "482913")]
    verification_code: Option<String>,
}

fn map_signup_error(err: CreateUserError, email: &str) -> HttpResponse {
    match err {
        CreateUserError::EmailAlreadyExists => {
            warn!(email = %email, "Signup rejected: email already registered");
            ApiResponse::bad_request("DUPLICATE_FIELD", "User already exists with this email")
        }
        CreateUserError::Unavailable(msg) => {
            error!(email = %email, error = %msg, "Signup failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        other => {
            error!(email = %email, error = %other, "Signup failed");
            ApiResponse::internal_error_with_detail(&other.to_string())
        }
    }
}

/// Create an account
///
/// Registers a student account, emails a 6-digit verification code and returns
/// an access token. The account can browse and list items immediately; bidding
/// waits for email verification.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<SignupResponse>)),
        (status = 400, description = "Validation failed or email already registered", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse),
        (status = 503, description = "Database connection error", body = ErrorResponse),
    )
)]
#[post("/signup")]
pub async fn signup_handler(
    req: web::Json<SignupRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match SignupRequest::new(&dto.name, &dto.email, &dto.password) {
        Ok(request) => request,
        Err(errors) => {
            warn!(email = %dto.email, violations = errors.len(), "Signup validation failed");
            return ApiResponse::validation_failed(errors);
        }
    };

    match data.auth.registration.register_user(request).await {
        Ok(created) => {
            info!(user_id = %created.user.id, email = %created.user.email, "Account created");

            ApiResponse::created(
                "Account created successfully! Please check your email for verification code.",
                SignupResponse {
                    user: UserSummary::from(&created.user),
                    token: created.token,
                    verification_code: data
                        .expose_verification_code
                        .then_some(created.verification_code),
                },
            )
        }
        Err(e) => map_signup_error(e, &dto.email),
    }
}
