pub mod app_state_builder;
pub mod auth_helper;
pub mod in_memory_ledger;
pub mod mocks;
pub mod stubs;
