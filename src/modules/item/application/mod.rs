pub mod domain;
pub mod item_use_cases;
pub mod ports;
pub mod service;
