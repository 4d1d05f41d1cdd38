pub mod auction_settlement_postgres;

pub use auction_settlement_postgres::AuctionSettlementPostgres;
