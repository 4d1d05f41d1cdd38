pub mod dto;
mod cancel_bid;
mod item_bids;
mod place_bid;
mod user_bids;

pub use cancel_bid::{cancel_bid_handler, CancelBidResponse};
pub use dto::{BidItemDto, BidResponse, BidderDto, ItemBidResponse, PlaceBidRequestDto, UserBidResponse};
pub use item_bids::{
    item_bid_history_handler, item_bids_handler, BidHistoryResponse, BidPageQuery, BidsPagination,
    ItemBidsResponse,
};
pub use place_bid::{place_bid_handler, PlaceBidResponse};
pub use user_bids::{user_bids_handler, winning_bids_handler, UserBidsResponse, WinningBidsResponse};

pub use cancel_bid::__path_cancel_bid_handler;
pub use item_bids::{__path_item_bid_history_handler, __path_item_bids_handler};
pub use place_bid::__path_place_bid_handler;
pub use user_bids::{__path_user_bids_handler, __path_winning_bids_handler};

use actix_web::web;

/// Handlers mounted under `/api/bids`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(place_bid_handler)
        .service(item_bids_handler)
        .service(item_bid_history_handler)
        .service(user_bids_handler)
        .service(winning_bids_handler)
        .service(cancel_bid_handler);
}
