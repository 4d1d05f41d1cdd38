use std::sync::Arc;

use crate::modules::bid::application::ports::incoming::use_cases::{
    CancelBidUseCase, ItemBidsUseCase, PlaceBidUseCase, UserBidsUseCase,
};

#[derive(Clone)]
pub struct BidUseCases {
    pub place: Arc<dyn PlaceBidUseCase>,
    pub cancel: Arc<dyn CancelBidUseCase>,
    pub item_bids: Arc<dyn ItemBidsUseCase>,
    pub user_bids: Arc<dyn UserBidsUseCase>,
}
