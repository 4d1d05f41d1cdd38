use actix_web::{post, web, Responder};
use chrono::Utc;
use tracing::{error, info, warn};

use super::dto::{ItemEnvelope, ItemRequestDto, ItemResponse};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::item::application::domain::validation::ItemDraft;
use crate::modules::item::application::ports::incoming::use_cases::CreateItemError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List an item for auction
///
/// The authenticated user becomes the seller. Unverified accounts may list.
#[utoipa::path(
    post,
    path = "/api/items",
    tag = "items",
    request_body = ItemRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (status = 201, description = "Item listed", body = inline(SuccessResponse<ItemEnvelope>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 503, description = "Database connection error", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn create_item_handler(
    user: AuthenticatedUser,
    req: web::Json<ItemRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let draft = match ItemDraft::parse(req.into_inner().into(), Utc::now()) {
        Ok(draft) => draft,
        Err(errors) => {
            warn!(seller_id = %user.user_id, violations = errors.len(), "Item listing validation failed");
            return ApiResponse::validation_failed(errors);
        }
    };

    match data.items.create.execute(user.user_id, draft).await {
        Ok(view) => {
            info!(item_id = %view.item.id, seller_id = %user.user_id, "Item listed");
            ApiResponse::created(
                "Item listed successfully!",
                ItemEnvelope {
                    item: ItemResponse::from_view(&view, Utc::now()),
                },
            )
        }
        Err(CreateItemError::Unavailable(msg)) => {
            error!(seller_id = %user.user_id, error = %msg, "Item listing failed: database unavailable");
            ApiResponse::service_unavailable()
        }
        Err(CreateItemError::RepositoryError(msg)) => {
            error!(seller_id = %user.user_id, error = %msg, "Item listing failed");
            ApiResponse::internal_error_with_detail(&msg)
        }
    }
}
