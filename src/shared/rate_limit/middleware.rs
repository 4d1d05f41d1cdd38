use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{
        header::{self, HeaderMap, HeaderValue},
        StatusCode,
    },
    middleware::Next,
    web, Error,
};
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::warn;

use super::rate_limiter::{RateLimitDecision, RateLimiter};
use crate::shared::api::ApiResponse;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetryAfter {
    retry_after: u64,
}

/// Per-client request limiting for a route scope, used with `actix_web::middleware::from_fn`.
///
/// Fails open when the limiter store is unreachable.
pub async fn rate_limit_middleware<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let limiter = match req.app_data::<web::Data<Arc<dyn RateLimiter + Send + Sync>>>() {
        Some(limiter) => limiter.clone(),
        None => return Ok(next.call(req).await?.map_into_left_body()),
    };

    let scope = scope_from_path(req.path());
    let client_key = client_ip(req.headers(), req.peer_addr().map(|addr| addr.ip()))
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match limiter.check(&scope, &client_key).await {
        Ok(RateLimitDecision::Limited { retry_after_secs }) => {
            warn!(scope = %scope, retry_after_secs, "Rate limit exceeded");

            let mut response = ApiResponse::error_with_data(
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Too many requests. Please try again later.",
                RetryAfter {
                    retry_after: retry_after_secs,
                },
            );
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));

            return Ok(req.into_response(response).map_into_right_body());
        }
        Ok(RateLimitDecision::Allowed { .. }) => {}
        Err(e) => {
            warn!(scope = %scope, error = %e, "Rate limiter unavailable, allowing request");
        }
    }

    Ok(next.call(req).await?.map_into_left_body())
}

/// `/api/auth/signin` -> `auth`
fn scope_from_path(path: &str) -> String {
    path.trim_start_matches('/')
        .trim_start_matches("api/")
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("root")
        .to_string()
}

/// X-Forwarded-For first, then X-Real-IP, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                if let Ok(ip) = first.trim().parse::<IpAddr>() {
                    return Some(ip);
                }
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(value) = real_ip.to_str() {
            if let Ok(ip) = value.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }

    peer
}
