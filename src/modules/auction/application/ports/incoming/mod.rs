mod settle_auctions;

pub use settle_auctions::{SettleAuctionsError, SettleAuctionsUseCase, SettlementReport};
