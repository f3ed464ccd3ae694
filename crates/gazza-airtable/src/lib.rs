pub mod client;
pub mod error;
pub mod records;

pub use client::AirtableClient;
pub use error::{Error, Result};
pub use records::{AirtableRecord, FieldValue};
