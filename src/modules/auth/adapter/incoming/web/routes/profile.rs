use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use super::dto::UserProfile;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::use_cases::fetch_profile::FetchUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    user: UserProfile,
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Profile", body = inline(SuccessResponse<ProfileResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/profile")]
pub async fn profile_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.auth.fetch_profile.execute(user.user_id).await {
        Ok(profile) => ApiResponse::success(
            "Profile retrieved successfully",
            ProfileResponse {
                user: UserProfile::from(&profile),
            },
        ),
        Err(FetchUserError::UserNotFound(_)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchUserError::Unavailable(msg)) => {
            error!(error = %msg, "Profile lookup failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        Err(FetchUserError::QueryError(msg)) => {
            error!(user_id = %user.user_id, error = %msg, "Profile lookup failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}
