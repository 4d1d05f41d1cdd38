use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

use super::dto::ItemResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::item::application::ports::incoming::use_cases::{
    ListItemsError, ListItemsParams, ListItemsRequest,
};
use crate::modules::item::application::ports::outgoing::ItemView;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListItemsQuery {
    /// One of the seven categories, or `ALL`
    pub category: Option<String>,
    /// Case-insensitive match over name and description, at most 100 characters
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 20)
    pub limit: Option<String>,
    /// `newest`, `oldest`, `price-low`, `price-high`, `ending-soon` or `most-bids`
    pub sort: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemsPagination {
    current: u32,
    /// Number of pages
    total: u64,
    /// Items on this page
    count: usize,
    total_items: u64,
}

#[derive(Serialize, ToSchema)]
pub struct AppliedFilters {
    category: String,
    search: String,
    sort: String,
}

#[derive(Serialize, ToSchema)]
pub struct ListItemsResponse {
    items: Vec<ItemResponse>,
    pagination: ItemsPagination,
    filters: AppliedFilters,
}

#[derive(Serialize, ToSchema)]
pub struct ItemsResponse {
    items: Vec<ItemResponse>,
}

fn to_responses(views: &[ItemView]) -> Vec<ItemResponse> {
    let now = Utc::now();
    views.iter().map(|view| ItemResponse::from_view(view, now)).collect()
}

fn map_list_error(err: ListItemsError) -> HttpResponse {
    match err {
        ListItemsError::Unavailable(msg) => {
            error!(error = %msg, "Item listing failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        ListItemsError::QueryFailed(msg) => {
            error!(error = %msg, "Item listing failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}

/// Browse biddable items
///
/// Lists active items whose auction has not ended, with filtering,
/// search, sorting and pagination.
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Items retrieved", body = inline(SuccessResponse<ListItemsResponse>)),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 503, description = "Database connection error", body = ErrorResponse),
    )
)]
#[get("")]
pub async fn list_items_handler(
    query: web::Query<ListItemsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let request = match ListItemsRequest::parse(ListItemsParams {
        category: query.category,
        search: query.search,
        page: query.page,
        limit: query.limit,
        sort: query.sort,
    }) {
        Ok(request) => request,
        Err(errors) => {
            warn!(violations = errors.len(), "Item listing rejected: invalid query");
            return ApiResponse::validation_failed(errors);
        }
    };

    let filters = AppliedFilters {
        category: request
            .filter
            .category
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "ALL".to_string()),
        search: request.filter.search.clone().unwrap_or_default(),
        sort: request.sort.as_str().to_string(),
    };

    match data.items.list.execute(request).await {
        Ok(page) => {
            let items = to_responses(&page.items);
            let pagination = ItemsPagination {
                current: page.page,
                total: page.total_pages(),
                count: items.len(),
                total_items: page.total,
            };
            ApiResponse::success(
                "Items retrieved successfully",
                ListItemsResponse {
                    items,
                    pagination,
                    filters,
                },
            )
        }
        Err(e) => map_list_error(e),
    }
}

/// Featured items
///
/// Up to 10 biddable items flagged as featured, newest first.
#[utoipa::path(
    get,
    path = "/api/items/featured",
    tag = "items",
    responses(
        (status = 200, description = "Featured items", body = inline(SuccessResponse<ItemsResponse>)),
        (status = 503, description = "Database connection error", body = ErrorResponse),
    )
)]
#[get("/featured")]
pub async fn featured_items_handler(data: web::Data<AppState>) -> impl Responder {
    match data.items.browse.featured().await {
        Ok(views) => ApiResponse::success(
            "Featured items retrieved successfully",
            ItemsResponse {
                items: to_responses(&views),
            },
        ),
        Err(e) => map_list_error(e),
    }
}

/// Items ending soon
///
/// Up to 10 biddable items whose auction ends within 24 hours, soonest first.
#[utoipa::path(
    get,
    path = "/api/items/ending-soon",
    tag = "items",
    responses(
        (status = 200, description = "Items ending soon", body = inline(SuccessResponse<ItemsResponse>)),
        (status = 503, description = "Database connection error", body = ErrorResponse),
    )
)]
#[get("/ending-soon")]
pub async fn ending_soon_items_handler(data: web::Data<AppState>) -> impl Responder {
    match data.items.browse.ending_soon().await {
        Ok(views) => ApiResponse::success(
            "Ending soon items retrieved successfully",
            ItemsResponse {
                items: to_responses(&views),
            },
        ),
        Err(e) => map_list_error(e),
    }
}
