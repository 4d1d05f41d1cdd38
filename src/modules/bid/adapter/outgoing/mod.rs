pub mod bid_ledger_postgres;
pub mod bid_query_postgres;
pub mod sea_orm_entity;

pub use bid_ledger_postgres::BidLedgerPostgres;
pub use bid_query_postgres::BidQueryPostgres;
