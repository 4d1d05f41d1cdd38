use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::resend_verification::ResendVerificationError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResendVerificationRequestDto {
    #[schema(example = "jane@campus.edu")]
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    verification_code: Option<String>,
}

fn map_resend_error(err: ResendVerificationError) -> HttpResponse {
    match err {
        ResendVerificationError::UserNotFound => {
            warn!("Resend verification for unknown email");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        ResendVerificationError::AlreadyVerified => {
            ApiResponse::bad_request("ALREADY_VERIFIED", "Email is already verified")
        }
        ResendVerificationError::Unavailable(msg) => {
            error!(error = %msg, "Resend verification failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        other => {
            error!(error = %other, "Resend verification failed");
            ApiResponse::internal_error_with_detail(&other.to_string())
        }
    }
}

/// Resend verification code
///
/// Replaces any outstanding code with a new one valid for 10 minutes.
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = "auth",
    request_body = ResendVerificationRequestDto,
    responses(
        (status = 200, description = "Code re-sent", body = inline(SuccessResponse<ResendVerificationResponse>)),
        (status = 400, description = "Missing email or already verified", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[post("/resend-verification")]
pub async fn resend_verification_handler(
    req: web::Json<ResendVerificationRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let email = match req.into_inner().email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return ApiResponse::bad_request("VALIDATION_ERROR", "Email is required"),
    };

    match data.auth.registration.resend_verification(&email).await {
        Ok(output) => {
            info!(user_id = %output.user.id, "Verification code re-issued");
            ApiResponse::success(
                "New verification code sent successfully",
                ResendVerificationResponse {
                    verification_code: data
                        .expose_verification_code
                        .then_some(output.verification_code),
                },
            )
        }
        Err(e) => map_resend_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::{StubCreateUser, StubResendVerification};
    use actix_web::{http::StatusCode, test, App};

    async fn post_resend(
        stub: StubResendVerification,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let state = TestAppStateBuilder::default()
            .with_registration(StubCreateUser::succeeding(), stub)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/auth").service(resend_verification_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/resend-verification")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn resend_returns_new_code() {
        let (status, body) = post_resend(
            StubResendVerification::succeeding(),
            serde_json::json!({ "email": "jane@campus.edu" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "New verification code sent successfully");
        assert_eq!(body["data"]["verificationCode"], "654321");
    }

    #[actix_web::test]
    async fn missing_email_is_rejected() {
        let (status, body) =
            post_resend(StubResendVerification::succeeding(), serde_json::json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email is required");
    }

    #[actix_web::test]
    async fn unknown_user_is_not_found() {
        let (status, body) = post_resend(
            StubResendVerification::not_found(),
            serde_json::json!({ "email": "ghost@campus.edu" }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "USER_NOT_FOUND");
    }

    #[actix_web::test]
    async fn verified_user_is_rejected() {
        let (status, body) = post_resend(
            StubResendVerification::failing(ResendVerificationError::AlreadyVerified),
            serde_json::json!({ "email": "jane@campus.edu" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ALREADY_VERIFIED");
        assert_eq!(body["message"], "Email is already verified");
    }
}
