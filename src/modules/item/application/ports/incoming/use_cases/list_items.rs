use async_trait::async_trait;

use crate::modules::item::application::domain::entities::Category;
use crate::modules::item::application::domain::validation::{clean_search, MAX_SEARCH_LEN};
use crate::modules::item::application::ports::outgoing::{
    ItemListFilter, ItemQueryError, ItemSort, ItemView,
};
use crate::shared::api::{PageRequest, PageResult};
use crate::shared::validation::{FieldError, Violations};

/// Raw query-string values; parsing happens here so bad values become field errors.
#[derive(Debug, Clone, Default)]
pub struct ListItemsParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemsRequest {
    pub filter: ItemListFilter,
    pub sort: ItemSort,
    pub page: PageRequest,
}

impl ListItemsRequest {
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn parse(params: ListItemsParams) -> Result<Self, Vec<FieldError>> {
        let mut v = Violations::new();

        let page = match params.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(page) if page >= 1 => page,
                _ => {
                    v.push_with_value("page", "Page must be a positive integer", raw);
                    1
                }
            },
        };

        let limit = match params.limit.as_deref().map(str::trim) {
            None | Some("") => Self::DEFAULT_LIMIT,
            Some(raw) => match raw.parse::<u32>() {
                Ok(limit) if (1..=PageRequest::MAX_PER_PAGE).contains(&limit) => limit,
                _ => {
                    v.push_with_value("limit", "Limit must be between 1 and 100", raw);
                    Self::DEFAULT_LIMIT
                }
            },
        };

        let category = match params.category.as_deref().map(str::trim) {
            None | Some("") | Some("ALL") => None,
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    v.push_with_value("category", "Invalid category", raw);
                    None
                }
            },
        };

        let sort = match params.sort.as_deref().map(str::trim) {
            None | Some("") => ItemSort::default(),
            Some(raw) => raw.parse::<ItemSort>().unwrap_or_else(|_| {
                v.push_with_value("sort", "Invalid sort option", raw);
                ItemSort::default()
            }),
        };

        let search = match params.search.as_deref() {
            Some(raw) if raw.chars().count() > MAX_SEARCH_LEN => {
                v.push("search", "Search query cannot exceed 100 characters");
                None
            }
            Some(raw) => clean_search(raw),
            None => None,
        };

        v.finish(ListItemsRequest {
            filter: ItemListFilter { category, search },
            sort,
            page: PageRequest::new(page, limit),
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListItemsError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<ItemQueryError> for ListItemsError {
    fn from(err: ItemQueryError) -> Self {
        match err {
            ItemQueryError::Unavailable(msg) => ListItemsError::Unavailable(msg),
            ItemQueryError::DatabaseError(msg) => ListItemsError::QueryFailed(msg),
        }
    }
}

#[async_trait]
pub trait ListItemsUseCase: Send + Sync {
    async fn execute(&self, request: ListItemsRequest)
        -> Result<PageResult<ItemView>, ListItemsError>;
}
