use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Airtable request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Airtable error: {status} {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Airtable response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Airtable credentials are not configured (set api_key and base_id in config.toml)")]
    NotConfigured,

    #[error("Invalid Airtable API base URL: {0}")]
    InvalidBase(String),
}

pub type Result<T> = std::result::Result<T, Error>;
