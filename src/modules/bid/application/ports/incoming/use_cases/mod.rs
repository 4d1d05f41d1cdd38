mod cancel_bid;
mod place_bid;
mod read_bids;

pub use cancel_bid::{CancelBidError, CancelBidUseCase};
pub use place_bid::{PlaceBidError, PlaceBidUseCase};
pub use read_bids::{
    parse_bid_page, ItemBidHistory, ItemBids, ItemBidsUseCase, ReadBidsError, UserBids,
    UserBidsUseCase, HISTORY_DEFAULT_LIMIT, ITEM_BIDS_DEFAULT_LIMIT,
};
