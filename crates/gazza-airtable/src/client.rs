use crate::records::{AirtableRecord, RecordPage};
use crate::{Error, Result};
use gazza_core::config::AirtableConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Public REST endpoint; tests point the client at a local mock instead.
pub const DEFAULT_API_BASE: &str = "https://api.airtable.com/v0";

/// Formula that selects listings still in the draft state.
const DRAFT_FILTER: &str = "{Stato}='Bozza'";

#[derive(Debug)]
pub struct AirtableClient {
    http: Client,
    api_base: String,
    api_key: String,
    base_id: String,
    table: String,
}

impl AirtableClient {
    pub fn new(config: &AirtableConfig) -> Result<Self> {
        if !config.is_complete() {
            return Err(Error::NotConfigured);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("gazza/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(AirtableClient {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: config.api_key.clone(),
            base_id: config.base_id.clone(),
            table: config.table.clone(),
        })
    }

    /// Point the client at a different API root.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Fetch every listing still in the draft state.
    pub async fn list_drafts(&self) -> Result<Vec<AirtableRecord>> {
        let url = self.table_url()?;
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .query(&[("filterByFormula", DRAFT_FILTER)])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response.text().await.ok()));
        }

        let page: RecordPage = response.json().await?;
        tracing::debug!("Fetched {} draft records", page.records.len());
        Ok(page.records)
    }

    /// Flip a record to published, stamping today's date.
    pub async fn mark_published(&self, record_id: &str) -> Result<()> {
        let url = self.record_url(record_id)?;
        let body = serde_json::json!({
            "fields": {
                "Stato": "Pubblicato",
                "Data Pubblicazione": publication_date(),
            }
        });

        tracing::debug!("PATCH {url}");
        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response.text().await.ok()));
        }
        Ok(())
    }

    // Table names can contain spaces, so the path is built through Url
    // rather than format!.
    fn table_url(&self) -> Result<Url> {
        let mut url =
            Url::parse(&self.api_base).map_err(|e| Error::InvalidBase(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBase(self.api_base.clone()))?
            .push(&self.base_id)
            .push(&self.table);
        Ok(url)
    }

    fn record_url(&self, record_id: &str) -> Result<Url> {
        let mut url = self.table_url()?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBase(self.api_base.clone()))?
            .push(record_id);
        Ok(url)
    }
}

/// Today's date in the `YYYY-MM-DD` shape the base stores.
pub fn publication_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn api_error(status: reqwest::StatusCode, body: Option<String>) -> Error {
    let message = body
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Error::Api {
        status: status.as_u16(),
        message,
    }
}
