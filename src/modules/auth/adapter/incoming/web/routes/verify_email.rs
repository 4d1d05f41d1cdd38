use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::dto::UserProfile;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::verify_user_email::{
    VerifyEmailRequest, VerifyUserEmailError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyEmailRequestDto {
    #[schema(example = "jane@campus.edu")]
    pub email: Option<String>,

    /// 6-digit code from the verification email
    #[schema(example = "482913")]
    pub code: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyEmailResponse {
    user: UserProfile,
    /// Fresh token carrying the verified flag
    token: String,
}

fn map_verify_email_error(err: VerifyUserEmailError) -> HttpResponse {
    match err {
        VerifyUserEmailError::InvalidCode => {
            warn!("Email verification failed: invalid or expired code");
            ApiResponse::bad_request(
                "INVALID_VERIFICATION_CODE",
                "Invalid or expired verification code",
            )
        }
        VerifyUserEmailError::Unavailable(msg) => {
            error!(error = %msg, "Email verification failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        other => {
            error!(error = %other, "Email verification failed");
            ApiResponse::internal_error_with_detail(&other.to_string())
        }
    }
}

/// Verify email address
///
/// Confirms the 6-digit code sent at signup. The code is cleared once used.
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    tag = "auth",
    request_body = VerifyEmailRequestDto,
    responses(
        (status = 200, description = "Email verified", body = inline(SuccessResponse<VerifyEmailResponse>)),
        (status = 400, description = "Missing fields or invalid code", body = ErrorResponse),
    )
)]
#[post("/verify-email")]
pub async fn verify_email_handler(
    req: web::Json<VerifyEmailRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let Some(request) = VerifyEmailRequest::new(dto.email.as_deref(), dto.code.as_deref()) else {
        return ApiResponse::bad_request(
            "VALIDATION_ERROR",
            "Email and verification code are required",
        );
    };

    match data.auth.verify_email.execute(request).await {
        Ok(output) => {
            info!(user_id = %output.user.id, "Email verified");
            ApiResponse::success(
                "Email verified successfully! You can now access all features.",
                VerifyEmailResponse {
                    user: UserProfile::from(&output.user),
                    token: output.token,
                },
            )
        }
        Err(e) => map_verify_email_error(e),
    }
}
