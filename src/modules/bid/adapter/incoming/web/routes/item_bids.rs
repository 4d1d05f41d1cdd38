use actix_web::{get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::dto::ItemBidResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::bid::application::ports::incoming::use_cases::{
    parse_bid_page, ReadBidsError, HISTORY_DEFAULT_LIMIT, ITEM_BIDS_DEFAULT_LIMIT,
};
use crate::shared::api::ApiResponse;
use crate::shared::money::cents_to_dollars;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BidPageQuery {
    /// 1-based page number
    pub page: Option<String>,
    /// Page size, 1 to 100
    pub limit: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidsPagination {
    current: u32,
    total: u64,
    count: usize,
    total_bids: u64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemBidsResponse {
    bids: Vec<ItemBidResponse>,
    item_name: String,
    current_bid: f64,
    bid_count: i32,
    pagination: BidsPagination,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidHistoryResponse {
    bid_history: Vec<ItemBidResponse>,
    item_name: String,
    total_bids: u64,
}

/// Shared by the item and user bid listings.
pub(super) fn read_error_response(err: ReadBidsError) -> HttpResponse {
    match err {
        ReadBidsError::ItemNotFound => ApiResponse::not_found("ITEM_NOT_FOUND", "Item not found"),
        ReadBidsError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        ReadBidsError::Forbidden => {
            ApiResponse::forbidden("FORBIDDEN", "Not authorized to view these bids")
        }
        ReadBidsError::Unavailable(msg) => {
            error!(error = %msg, "Bid lookup failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        ReadBidsError::QueryFailed(msg) => {
            error!(error = %msg, "Bid lookup failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}

/// Bids on an item
///
/// Highest first, paginated, each with its bidder.
#[utoipa::path(
    get,
    path = "/api/bids/item/{itemId}",
    tag = "bids",
    params(("itemId" = Uuid, Path, description = "Item id"), BidPageQuery),
    responses(
        (status = 200, description = "Bids retrieved", body = inline(SuccessResponse<ItemBidsResponse>)),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
#[get("/item/{item_id}")]
pub async fn item_bids_handler(
    path: web::Path<Uuid>,
    query: web::Query<BidPageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let item_id = path.into_inner();
    let page = match parse_bid_page(
        query.page.as_deref(),
        query.limit.as_deref(),
        ITEM_BIDS_DEFAULT_LIMIT,
    ) {
        Ok(page) => page,
        Err(errors) => {
            warn!(item_id = %item_id, violations = errors.len(), "Bid listing rejected: invalid query");
            return ApiResponse::validation_failed(errors);
        }
    };

    match data.bids.item_bids.list(item_id, page).await {
        Ok(listing) => {
            let bids: Vec<ItemBidResponse> =
                listing.bids.items.iter().map(ItemBidResponse::from).collect();
            let pagination = BidsPagination {
                current: listing.bids.page,
                total: listing.bids.total_pages(),
                count: bids.len(),
                total_bids: listing.bids.total,
            };
            ApiResponse::success(
                "Bids retrieved successfully",
                ItemBidsResponse {
                    bids,
                    item_name: listing.item.name,
                    current_bid: cents_to_dollars(listing.item.current_bid_cents),
                    bid_count: listing.item.bid_count,
                    pagination,
                },
            )
        }
        Err(e) => read_error_response(e),
    }
}

/// Bid history of an item
///
/// Newest first.
#[utoipa::path(
    get,
    path = "/api/bids/item/{itemId}/history",
    tag = "bids",
    params(("itemId" = Uuid, Path, description = "Item id"), BidPageQuery),
    responses(
        (status = 200, description = "History retrieved", body = inline(SuccessResponse<BidHistoryResponse>)),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
#[get("/item/{item_id}/history")]
pub async fn item_bid_history_handler(
    path: web::Path<Uuid>,
    query: web::Query<BidPageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let item_id = path.into_inner();
    let limit = match parse_bid_page(None, query.limit.as_deref(), HISTORY_DEFAULT_LIMIT) {
        Ok(page) => page.per_page,
        Err(errors) => return ApiResponse::validation_failed(errors),
    };

    match data.bids.item_bids.history(item_id, limit).await {
        Ok(history) => ApiResponse::success(
            "Bid history retrieved successfully",
            BidHistoryResponse {
                bid_history: history.bids.iter().map(ItemBidResponse::from).collect(),
                item_name: history.item.name,
                total_bids: history.total_bids,
            },
        ),
        Err(e) => read_error_response(e),
    }
}
