pub mod json_config;
pub mod pagination;
pub mod response;

pub use json_config::{custom_json_config, custom_path_config, custom_query_config, route_not_found};
pub use pagination::{PageRequest, PageResult};
pub use response::{ApiResponse, FieldError};
