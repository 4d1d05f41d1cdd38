mod settle_auctions_service;

pub use settle_auctions_service::SettleAuctionsService;
