mod browse_items;
mod create_item;
mod get_item;
mod list_items;
mod manage_item;

pub use browse_items::BrowseItemsUseCase;
pub use create_item::{CreateItemError, CreateItemUseCase};
pub use get_item::{GetItemError, GetItemUseCase};
pub use list_items::{ListItemsError, ListItemsParams, ListItemsRequest, ListItemsUseCase};
pub use manage_item::{DeleteItemUseCase, ManageItemError, UpdateItemUseCase};
