pub mod item_query;
pub mod item_repository;

pub use item_query::{
    ItemListFilter, ItemQuery, ItemQueryError, ItemSort, ItemView, SellerSummary, WinnerSummary,
};
pub use item_repository::{GuardedWrite, ItemRepository, ItemRepositoryError};
