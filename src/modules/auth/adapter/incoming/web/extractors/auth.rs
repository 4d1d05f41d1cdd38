use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider,
};
use crate::modules::auth::application::use_cases::fetch_profile::FetchUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// A request whose bearer token is valid and whose account exists and is active.
///
/// The account is re-read on every request, so deactivation and email
/// verification take effect without a new token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_provider = req
            .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
            .cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_token_from_header(req);

        Box::pin(async move {
            let (Some(token_provider), Some(state)) = (token_provider, state) else {
                tracing::error!("Authentication extractor used without TokenProvider or AppState");
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            let token = token.ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "MISSING_TOKEN",
                    "Access token is required",
                ))
            })?;

            let claims = token_provider
                .verify_access_token(&token)
                .map_err(|e| match e {
                    TokenError::TokenExpired => create_api_error(ApiResponse::unauthorized(
                        "TOKEN_EXPIRED",
                        "Token has expired",
                    )),
                    _ => create_api_error(ApiResponse::unauthorized(
                        "INVALID_TOKEN",
                        "Invalid token",
                    )),
                })?;

            let user = state
                .auth
                .fetch_profile
                .execute(claims.sub)
                .await
                .map_err(|e| match e {
                    FetchUserError::UserNotFound(_) => create_api_error(
                        ApiResponse::unauthorized("USER_NOT_FOUND", "User not found"),
                    ),
                    FetchUserError::Unavailable(msg) => {
                        tracing::error!(error = %msg, "Database unavailable during authentication");
                        create_api_error(ApiResponse::service_unavailable())
                    }
                    FetchUserError::QueryError(msg) => {
                        tracing::error!(error = %msg, "User lookup failed during authentication");
                        create_api_error(ApiResponse::internal_error_with_detail(&msg))
                    }
                })?;

            if !user.is_active {
                tracing::warn!(user_id = %user.id, "Request from deactivated account rejected");
                return Err(create_api_error(ApiResponse::unauthorized(
                    "ACCOUNT_DEACTIVATED",
                    "Account is deactivated",
                )));
            }

            Ok(AuthenticatedUser {
                user_id: user.id,
                name: user.name,
                email: user.email,
                is_verified: user.is_email_verified,
            })
        })
    }
}

/// An authenticated user whose email address has been verified.
#[derive(Debug, Clone)]
pub struct VerifiedUser(pub AuthenticatedUser);

impl VerifiedUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

impl FromRequest for VerifiedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let authenticated = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let user = authenticated.await?;

            if !user.is_verified {
                return Err(create_api_error(ApiResponse::forbidden(
                    "EMAIL_NOT_VERIFIED",
                    "Email verification required",
                )));
            }

            Ok(VerifiedUser(user))
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::sample_user;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, test_token_provider_data};
    use crate::tests::support::stubs::StubFetchUserProfile;
    use actix_web::{get, http::StatusCode, test, App, Responder};

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        ApiResponse::success("ok", serde_json::json!({ "id": user.user_id }))
    }

    #[get("/verified")]
    async fn verified(user: VerifiedUser) -> impl Responder {
        ApiResponse::success("ok", serde_json::json!({ "id": user.user_id() }))
    }

    async fn call(
        profile: StubFetchUserProfile,
        uri: &str,
        authorization: Option<String>,
    ) -> (StatusCode, serde_json::Value) {
        let state = TestAppStateBuilder::default()
            .with_fetch_profile(Arc::new(profile))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_provider_data())
                .service(whoami)
                .service(verified),
        )
        .await;

        let mut req = test::TestRequest::get().uri(uri);
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn missing_header_is_missing_token() {
        let (status, body) = call(StubFetchUserProfile::not_found(), "/whoami", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "MISSING_TOKEN");
        assert_eq!(body["message"], "Access token is required");
    }

    #[actix_web::test]
    async fn garbage_token_is_invalid() {
        let (status, body) = call(
            StubFetchUserProfile::not_found(),
            "/whoami",
            Some("Bearer not.a.jwt".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "INVALID_TOKEN");
    }

    #[actix_web::test]
    async fn token_for_deleted_user_is_rejected() {
        let user = sample_user();
        let (status, body) = call(
            StubFetchUserProfile::not_found(),
            "/whoami",
            Some(bearer(user.id, false)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "USER_NOT_FOUND");
    }

    #[actix_web::test]
    async fn deactivated_account_is_rejected() {
        let mut user = sample_user();
        user.is_active = false;
        let id = user.id;

        let (status, body) = call(
            StubFetchUserProfile::returning(user),
            "/whoami",
            Some(bearer(id, false)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "ACCOUNT_DEACTIVATED");
    }

    #[actix_web::test]
    async fn active_user_passes() {
        let user = sample_user();
        let id = user.id;

        let (status, body) = call(
            StubFetchUserProfile::returning(user),
            "/whoami",
            Some(bearer(id, false)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id.to_string());
    }

    #[actix_web::test]
    async fn unverified_user_is_forbidden_from_verified_routes() {
        let user = sample_user();
        let id = user.id;

        let (status, body) = call(
            StubFetchUserProfile::returning(user),
            "/verified",
            Some(bearer(id, false)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "EMAIL_NOT_VERIFIED");
    }

    #[actix_web::test]
    async fn verification_status_comes_from_the_database_not_the_token() {
        let mut user = sample_user();
        user.is_email_verified = true;
        let id = user.id;

        // Token minted before verification still works once the account is verified
        let (status, _) = call(
            StubFetchUserProfile::returning(user),
            "/verified",
            Some(bearer(id, false)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
