use std::sync::Arc;

use crate::modules::item::application::ports::incoming::use_cases::{
    BrowseItemsUseCase, CreateItemUseCase, DeleteItemUseCase, GetItemUseCase, ListItemsUseCase,
    UpdateItemUseCase,
};

#[derive(Clone)]
pub struct ItemUseCases {
    pub list: Arc<dyn ListItemsUseCase>,
    pub browse: Arc<dyn BrowseItemsUseCase>,
    pub get: Arc<dyn GetItemUseCase>,
    pub create: Arc<dyn CreateItemUseCase>,
    pub update: Arc<dyn UpdateItemUseCase>,
    pub delete: Arc<dyn DeleteItemUseCase>,
}
