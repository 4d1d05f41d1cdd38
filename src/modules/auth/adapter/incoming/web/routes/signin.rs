use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::dto::UserProfile;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SigninRequestDto {
    #[schema(example = "jane@campus.edu")]
    #[serde(default)]
    pub email: String,

    #[schema(example = "Secret123")]
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct SigninResponse {
    user: UserProfile,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    token: String,
}

fn map_signin_error(err: LoginError) -> HttpResponse {
    match err {
        LoginError::InvalidCredentials => {
            warn!("Signin failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        LoginError::AccountDeactivated => {
            warn!("Signin failed: account deactivated");
            ApiResponse::unauthorized("ACCOUNT_DEACTIVATED", "Your account has been deactivated")
        }
        LoginError::Unavailable(msg) => {
            error!(error = %msg, "Signin failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        other => {
            error!(error = %other, "Signin failed");
            ApiResponse::internal_error_with_detail(&other.to_string())
        }
    }
}

/// Sign in
///
/// Authenticates with email and password and returns the full profile with an access token.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "auth",
    request_body = SigninRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<SigninResponse>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or deactivated account", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse),
    )
)]
#[post("/signin")]
pub async fn signin_handler(
    req: web::Json<SigninRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match LoginRequest::new(&dto.email, &dto.password) {
        Ok(request) => request,
        Err(errors) => return ApiResponse::validation_failed(errors),
    };

    info!(email = %request.email(), "Signin attempt");

    match data.auth.login.execute(request).await {
        Ok(output) => {
            info!(user_id = %output.user.id, "User signed in");
            ApiResponse::success(
                "Login successful",
                SigninResponse {
                    user: UserProfile::from(&output.user),
                    token: output.token,
                },
            )
        }
        Err(e) => map_signin_error(e),
    }
}
