use actix_web::{get, web, Responder};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::dto::UserBidResponse;
use super::item_bids::read_error_response;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBidsResponse {
    active_bids: Vec<UserBidResponse>,
    past_bids: Vec<UserBidResponse>,
    total_bids: usize,
    user_name: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinningBidsResponse {
    winning_bids: Vec<UserBidResponse>,
    count: usize,
}

/// A user's bids
///
/// Only the user themselves. Bids on items still open for bidding are
/// listed apart from the rest.
#[utoipa::path(
    get,
    path = "/api/bids/user/{userId}",
    tag = "bids",
    params(("userId" = Uuid, Path, description = "User id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Bids retrieved", body = inline(SuccessResponse<UserBidsResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is a different user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[get("/user/{user_id}")]
pub async fn user_bids_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let now = Utc::now();

    match data.bids.user_bids.all(user.user_id, path.into_inner()).await {
        Ok(bids) => {
            let active_bids: Vec<UserBidResponse> = bids
                .active
                .iter()
                .map(|row| UserBidResponse::from_row(row, now))
                .collect();
            let past_bids: Vec<UserBidResponse> = bids
                .past
                .iter()
                .map(|row| UserBidResponse::from_row(row, now))
                .collect();
            ApiResponse::success(
                "User bids retrieved successfully",
                UserBidsResponse {
                    total_bids: active_bids.len() + past_bids.len(),
                    active_bids,
                    past_bids,
                    user_name: bids.user_name,
                },
            )
        }
        Err(e) => read_error_response(e),
    }
}

/// Bids the user is currently winning
///
/// Active bids on items still open for bidding, with the seller.
#[utoipa::path(
    get,
    path = "/api/bids/user/{userId}/winning",
    tag = "bids",
    params(("userId" = Uuid, Path, description = "User id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Winning bids retrieved", body = inline(SuccessResponse<WinningBidsResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is a different user", body = ErrorResponse),
    )
)]
#[get("/user/{user_id}/winning")]
pub async fn winning_bids_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let now = Utc::now();

    match data.bids.user_bids.winning(user.user_id, path.into_inner()).await {
        Ok(rows) => {
            let winning_bids: Vec<UserBidResponse> = rows
                .iter()
                .map(|row| UserBidResponse::from_row(row, now))
                .collect();
            ApiResponse::success(
                "Winning bids retrieved successfully",
                WinningBidsResponse {
                    count: winning_bids.len(),
                    winning_bids,
                },
            )
        }
        Err(e) => read_error_response(e),
    }
}
