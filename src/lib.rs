pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod models;
pub mod random;
pub mod scrape;
pub mod store;

pub use error::{Error, Result};

/// Application name for XDG paths
pub const APP_NAME: &str = "songharvest";
