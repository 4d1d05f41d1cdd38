use actix_web::{delete, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::bid::application::domain::rules::CancelRejection;
use crate::modules::bid::application::ports::incoming::use_cases::CancelBidError;
use crate::shared::api::ApiResponse;
use crate::shared::money::cents_to_dollars;
use crate::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelBidResponse {
    new_current_bid: f64,
    new_bid_count: i32,
}

fn rejection_response(rejection: CancelRejection) -> HttpResponse {
    match rejection {
        CancelRejection::BidNotFound => ApiResponse::not_found(rejection.code(), rejection.message()),
        CancelRejection::NotOwner => ApiResponse::forbidden(rejection.code(), rejection.message()),
        CancelRejection::NotActive | CancelRejection::WindowExpired => {
            ApiResponse::bad_request(rejection.code(), rejection.message())
        }
    }
}

/// Cancel a bid
///
/// Only the bidder, only while the bid is active, and only within five
/// minutes of placing it. The best earlier bid becomes active again.
#[utoipa::path(
    delete,
    path = "/api/bids/{bidId}",
    tag = "bids",
    params(("bidId" = Uuid, Path, description = "Bid id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Bid cancelled", body = inline(SuccessResponse<CancelBidResponse>)),
        (status = 400, description = "Bid not active or window expired", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller did not place the bid", body = ErrorResponse),
        (status = 404, description = "Bid not found", body = ErrorResponse),
    )
)]
#[delete("/{bid_id}")]
pub async fn cancel_bid_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bid_id = path.into_inner();

    match data.bids.cancel.execute(user.user_id, bid_id).await {
        Ok(cancelled) => {
            info!(
                bid_id = %bid_id,
                item_id = %cancelled.item_id,
                bidder_id = %user.user_id,
                "Bid cancelled"
            );
            ApiResponse::success(
                "Bid cancelled successfully",
                CancelBidResponse {
                    new_current_bid: cents_to_dollars(cancelled.new_current_bid_cents),
                    new_bid_count: cancelled.new_bid_count,
                },
            )
        }
        Err(CancelBidError::Rejected(rejection)) => {
            warn!(bid_id = %bid_id, caller_id = %user.user_id, code = rejection.code(), "Bid cancellation rejected");
            rejection_response(rejection)
        }
        Err(CancelBidError::Conflict) => ApiResponse::conflict(
            "BID_CONFLICT",
            "The item changed while cancelling, please try again",
        ),
        Err(CancelBidError::Unavailable(msg)) => {
            error!(bid_id = %bid_id, error = %msg, "Bid cancellation failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        Err(CancelBidError::RepositoryError(msg)) => {
            error!(bid_id = %bid_id, error = %msg, "Bid cancellation failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}
