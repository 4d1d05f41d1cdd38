mod create_item_service;
mod get_item_service;
mod list_items_service;
mod manage_item_service;

pub use create_item_service::CreateItemService;
pub use get_item_service::GetItemService;
pub use list_items_service::ListItemsService;
pub use manage_item_service::ManageItemService;
