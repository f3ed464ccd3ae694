pub mod activity;
pub mod config;
pub mod error;
pub mod export;
pub mod listing;
pub mod mappings;
pub mod paths;
pub mod protocol;

pub use error::{Error, Result};
