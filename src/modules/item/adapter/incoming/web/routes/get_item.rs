use actix_web::{get, web, Responder};
use chrono::Utc;
use tracing::error;
use uuid::Uuid;

use super::dto::{ItemEnvelope, ItemResponse};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::item::application::ports::incoming::use_cases::GetItemError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Item details
///
/// Returns one item with its seller, winner (once sold), time left and the
/// minimum next bid. Each call counts as a view.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item retrieved", body = inline(SuccessResponse<ItemEnvelope>)),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 503, description = "Database connection error", body = ErrorResponse),
    )
)]
#[get("/{id}")]
pub async fn get_item_handler(path: web::Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let item_id = path.into_inner();

    match data.items.get.execute(item_id).await {
        Ok(view) => ApiResponse::success(
            "Item retrieved successfully",
            ItemEnvelope {
                item: ItemResponse::from_view(&view, Utc::now()),
            },
        ),
        Err(GetItemError::NotFound) => ApiResponse::not_found("ITEM_NOT_FOUND", "Item not found"),
        Err(GetItemError::Unavailable(msg)) => {
            error!(item_id = %item_id, error = %msg, "Item lookup failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        Err(GetItemError::QueryFailed(msg)) => {
            error!(item_id = %item_id, error = %msg, "Item lookup failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}
