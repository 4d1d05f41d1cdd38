mod bid_read_service;
mod cancel_bid_service;
mod conflict_retry;
mod place_bid_service;

pub use bid_read_service::BidReadService;
pub use cancel_bid_service::CancelBidService;
pub use place_bid_service::PlaceBidService;
