use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use super::dto::{BidResponse, PlaceBidRequestDto};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::VerifiedUser;
use crate::modules::bid::application::domain::rules::{PlaceBid, PlacementRejection};
use crate::modules::bid::application::ports::incoming::use_cases::PlaceBidError;
use crate::shared::api::ApiResponse;
use crate::shared::money::cents_to_dollars;
use crate::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidResponse {
    bid: BidResponse,
    new_current_bid: f64,
    bid_count: i32,
    minimum_next_bid: f64,
}

fn rejection_response(rejection: &PlacementRejection) -> HttpResponse {
    let message = rejection.message();
    match rejection {
        PlacementRejection::ItemNotFound | PlacementRejection::BidderNotFound => {
            ApiResponse::not_found(rejection.code(), &message)
        }
        _ => ApiResponse::bad_request(rejection.code(), &message),
    }
}

/// Place a bid
///
/// The bidder is the caller. The item row is locked for the whole
/// placement, so concurrent bids on one item are applied one at a time.
#[utoipa::path(
    post,
    path = "/api/bids",
    tag = "bids",
    request_body = PlaceBidRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (status = 201, description = "Bid placed", body = inline(SuccessResponse<PlaceBidResponse>)),
        (status = 400, description = "Validation failed, auction closed, own item or bid too low", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 404, description = "Item or bidder not found", body = ErrorResponse),
        (status = 409, description = "Concurrent bids kept conflicting", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn place_bid_handler(
    user: VerifiedUser,
    req: web::Json<PlaceBidRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bidder_id = user.user_id();
    let req = req.into_inner();

    let request = match PlaceBid::parse(req.item_id.as_deref(), req.amount) {
        Ok(request) => request,
        Err(errors) => {
            warn!(bidder_id = %bidder_id, violations = errors.len(), "Bid validation failed");
            return ApiResponse::validation_failed(errors);
        }
    };

    match data.bids.place.execute(bidder_id, request).await {
        // The service logs the placement
        Ok(placed) => ApiResponse::created(
            "Bid placed successfully!",
            PlaceBidResponse {
                bid: BidResponse::from(&placed.bid),
                new_current_bid: cents_to_dollars(placed.item.current_bid_cents),
                bid_count: placed.item.bid_count,
                minimum_next_bid: cents_to_dollars(placed.item.minimum_next_bid_cents()),
            },
        ),
        Err(PlaceBidError::Rejected(rejection)) => {
            warn!(
                item_id = %request.item_id,
                bidder_id = %bidder_id,
                code = rejection.code(),
                "Bid rejected"
            );
            rejection_response(&rejection)
        }
        Err(PlaceBidError::Conflict) => {
            warn!(item_id = %request.item_id, bidder_id = %bidder_id, "Bid gave up after repeated conflicts");
            ApiResponse::conflict(
                "BID_CONFLICT",
                "Another bid was placed at the same time, please try again",
            )
        }
        Err(PlaceBidError::Unavailable(msg)) => {
            error!(item_id = %request.item_id, error = %msg, "Bid failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        Err(PlaceBidError::RepositoryError(msg)) => {
            error!(item_id = %request.item_id, error = %msg, "Bid failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}
