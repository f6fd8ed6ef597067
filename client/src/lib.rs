pub mod client_api;
pub mod http_client;
