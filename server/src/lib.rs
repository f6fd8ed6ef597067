pub mod book_store;
pub mod error;
pub mod location_log;
pub mod logging;
pub mod server;
pub mod storage;
pub mod util;
pub mod validation;
