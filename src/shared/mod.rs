pub mod api;
pub mod db;
pub mod money;
pub mod rate_limit;
pub mod validation;
