// src/shared/api/json_config.rs
use crate::shared::api::{ApiResponse, FieldError};
use actix_web::web::{JsonConfig, PathConfig, QueryConfig};
use actix_web::HttpResponse;

pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            ApiResponse::validation_failed(vec![FieldError::new("body", &message)]),
        )
        .into()
    })
}

pub fn custom_query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            ApiResponse::validation_failed(vec![FieldError::new("query", &message)]),
        )
        .into()
    })
}

/// Malformed ids in the path are reported as missing resources.
pub fn custom_path_config() -> PathConfig {
    PathConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(
            err,
            ApiResponse::not_found("INVALID_ID", "Resource not found"),
        )
        .into()
    })
}

pub async fn route_not_found() -> HttpResponse {
    ApiResponse::not_found("ROUTE_NOT_FOUND", "Route not found")
}
