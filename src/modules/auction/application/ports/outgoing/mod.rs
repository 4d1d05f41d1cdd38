pub mod settlement_store;

pub use settlement_store::{SettlementOutcome, SettlementStore, SettlementStoreError, SoldItem};
