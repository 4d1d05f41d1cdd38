// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

pub use crate::shared::validation::FieldError;

static EXPOSE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

/// Allows 500 responses to carry the underlying error text. Enabled in development only.
pub fn expose_error_details(enabled: bool) {
    EXPOSE_ERROR_DETAILS.store(enabled, Ordering::Relaxed);
}

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::ok_body(message, data))
    }

    pub fn created(message: &str, data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::ok_body(message, data))
    }

    /// Failure that still carries a payload (e.g. `retryAfter` on 429).
    pub fn error_with_data(status: StatusCode, code: &str, message: &str, data: T) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse {
            success: false,
            message: message.to_string(),
            error: Some(code.to_string()),
            data: Some(data),
            errors: None,
        })
    }

    fn ok_body(message: &str, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.to_string(),
            error: None,
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::<()> {
            success: true,
            message: message.to_string(),
            error: None,
            data: None,
            errors: None,
        })
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse::<()> {
            success: false,
            message: message.to_string(),
            error: Some(code.to_string()),
            data: None,
            errors: None,
        })
    }

    pub fn validation_failed(errors: Vec<FieldError>) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()> {
            success: false,
            message: "Validation failed".to_string(),
            error: Some("VALIDATION_ERROR".to_string()),
            data: None,
            errors: Some(errors),
        })
    }

    pub fn not_found(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn forbidden(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::FORBIDDEN, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn conflict(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, code, message)
    }

    pub fn service_unavailable() -> HttpResponse {
        Self::error(
            StatusCode::SERVICE_UNAVAILABLE,
            "DB_CONNECTION_ERROR",
            "Database connection error",
        )
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    /// 500 response; the detail is only included when error details are exposed.
    pub fn internal_error_with_detail(detail: &str) -> HttpResponse {
        if !EXPOSE_ERROR_DETAILS.load(Ordering::Relaxed) {
            return Self::internal_error();
        }

        HttpResponse::InternalServerError().json(ApiResponse::<()> {
            success: false,
            message: "Internal server error".to_string(),
            error: Some("INTERNAL_ERROR".to_string()),
            data: None,
            errors: Some(vec![FieldError::new("server", detail)]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn success_envelope_has_message_and_data() {
        let resp = ApiResponse::success("Login successful", serde_json::json!({"token": "t"}));
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["data"]["token"], "t");
        assert!(body.get("error").is_none());
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn validation_failure_lists_fields() {
        let resp = ApiResponse::validation_failed(vec![
            FieldError::new("email", "Please provide a valid email address"),
            FieldError::with_value("name", "Name must be between 2 and 50 characters", "A"),
        ]);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["errors"][0]["field"], "email");
        assert!(body["errors"][0].get("value").is_none());
        assert_eq!(body["errors"][1]["value"], "A");
    }

    #[actix_web::test]
    async fn internal_error_hides_detail_unless_exposed() {
        expose_error_details(false);
        let body = body_json(ApiResponse::internal_error_with_detail("pool timed out")).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("errors").is_none());
    }
}
