pub mod auction;
pub mod auth;
pub mod bid;
pub mod email;
pub mod item;
