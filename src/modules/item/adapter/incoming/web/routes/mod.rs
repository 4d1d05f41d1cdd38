pub mod dto;
mod create_item;
mod get_item;
mod list_items;
mod manage_item;

pub use create_item::create_item_handler;
pub use dto::{ItemEnvelope, ItemRequestDto, ItemResponse, SellerDto, WinnerDto};
pub use get_item::get_item_handler;
pub use list_items::{
    ending_soon_items_handler, featured_items_handler, list_items_handler, AppliedFilters,
    ItemsPagination, ItemsResponse, ListItemsQuery, ListItemsResponse,
};
pub use manage_item::{delete_item_handler, update_item_handler};

pub use create_item::__path_create_item_handler;
pub use get_item::__path_get_item_handler;
pub use list_items::{
    __path_ending_soon_items_handler, __path_featured_items_handler, __path_list_items_handler,
};
pub use manage_item::{__path_delete_item_handler, __path_update_item_handler};

use actix_web::web;

/// Handlers mounted under `/api/items`. Literal segments precede `/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_items_handler)
        .service(create_item_handler)
        .service(featured_items_handler)
        .service(ending_soon_items_handler)
        .service(get_item_handler)
        .service(update_item_handler)
        .service(delete_item_handler);
}
