use actix_web::{delete, put, web, HttpResponse, Responder};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::dto::{ItemEnvelope, ItemRequestDto, ItemResponse};
use crate::api::schemas::{ErrorResponse, MessageResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::item::application::domain::validation::ItemChanges;
use crate::modules::item::application::ports::incoming::use_cases::ManageItemError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Wording differs between edit and delete; codes do not.
struct Refusals {
    not_owner: &'static str,
    has_bids: &'static str,
}

const UPDATE: Refusals = Refusals {
    not_owner: "Not authorized to update this item",
    has_bids: "Cannot edit item that has bids",
};

const DELETE: Refusals = Refusals {
    not_owner: "Not authorized to delete this item",
    has_bids: "Cannot delete item that has bids",
};

fn map_manage_error(err: ManageItemError, item_id: Uuid, refusals: &Refusals) -> HttpResponse {
    match err {
        ManageItemError::NotFound => ApiResponse::not_found("ITEM_NOT_FOUND", "Item not found"),
        ManageItemError::NotOwner => ApiResponse::forbidden("NOT_ITEM_OWNER", refusals.not_owner),
        ManageItemError::HasBids => ApiResponse::bad_request("ITEM_HAS_BIDS", refusals.has_bids),
        ManageItemError::Unavailable(msg) => {
            error!(item_id = %item_id, error = %msg, "Item change failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        ManageItemError::RepositoryError(msg) => {
            error!(item_id = %item_id, error = %msg, "Item change failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}

/// Update an item
///
/// Seller only, and only while the item has no bids. Any subset of the
/// listing fields may be sent; changing the starting price resets the
/// current bid.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = ItemRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Item updated", body = inline(SuccessResponse<ItemEnvelope>)),
        (status = 400, description = "Validation failed or item has bids", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the seller", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
#[put("/{id}")]
pub async fn update_item_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<ItemRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let item_id = path.into_inner();

    let changes = match ItemChanges::parse(req.into_inner().into(), Utc::now()) {
        Ok(changes) => changes,
        Err(errors) => {
            warn!(item_id = %item_id, violations = errors.len(), "Item update validation failed");
            return ApiResponse::validation_failed(errors);
        }
    };

    match data.items.update.execute(user.user_id, item_id, changes).await {
        Ok(view) => {
            info!(item_id = %item_id, seller_id = %user.user_id, "Item updated");
            ApiResponse::success(
                "Item updated successfully",
                ItemEnvelope {
                    item: ItemResponse::from_view(&view, Utc::now()),
                },
            )
        }
        Err(e) => map_manage_error(e, item_id, &UPDATE),
    }
}

/// Delete an item
///
/// Seller only, and only while the item has no bids.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 400, description = "Item has bids", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the seller", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
#[delete("/{id}")]
pub async fn delete_item_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let item_id = path.into_inner();

    match data.items.delete.execute(user.user_id, item_id).await {
        Ok(()) => {
            info!(item_id = %item_id, seller_id = %user.user_id, "Item deleted");
            ApiResponse::message("Item deleted successfully")
        }
        Err(e) => map_manage_error(e, item_id, &DELETE),
    }
}
