pub mod cache;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod scrape;
pub mod server;
pub mod types;
pub mod views;
