pub mod http_api;
pub mod traits;
