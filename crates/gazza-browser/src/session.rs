use crate::{Error, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_RETRIES: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A live DevTools connection to a running Chrome.
///
/// The session never owns the Chrome process, so dropping it (or calling
/// [`BrowserSession::detach`]) leaves the browser running.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Connect to the Chrome instance listening on `port`, retrying while
    /// it finishes starting up.
    pub async fn connect(port: u16) -> Result<Self> {
        let ws_url = format!("http://localhost:{port}");
        let (browser, mut handler) = {
            let mut retries = CONNECT_RETRIES;
            loop {
                tracing::debug!("Attempting CDP connection to {ws_url}...");
                match Browser::connect(&ws_url).await {
                    Ok(result) => {
                        tracing::info!("CDP connection established");
                        break result;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(Error::Cdp(format!(
                                "Failed to connect to Chrome on port {port} after {CONNECT_RETRIES} attempts: {e}"
                            )));
                        }
                        tracing::debug!(
                            "CDP connection attempt failed, retrying... ({retries} left)"
                        );
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        };

        // The handler stream must be drained for any browser command to
        // resolve.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        Ok(BrowserSession {
            browser,
            handler_task,
        })
    }

    /// First open tab whose URL contains one of `patterns`.
    pub async fn find_tab(&self, patterns: &[&str]) -> Result<Option<Page>> {
        for page in self.browser.pages().await? {
            let url = page.url().await?.unwrap_or_default();
            if url_matches(&url, patterns) {
                tracing::debug!("Reusing tab at {url}");
                return Ok(Some(page));
            }
        }
        Ok(None)
    }

    /// Open `url` in a new tab.
    pub async fn open_tab(&self, url: &str) -> Result<Page> {
        Ok(self.browser.new_page(url).await?)
    }

    /// Drop the CDP connection, leaving the browser running.
    pub fn detach(self) {
        let BrowserSession {
            browser,
            handler_task,
        } = self;
        handler_task.abort();
        drop(browser);
    }
}

/// True when `url` contains any of the host patterns.
pub fn url_matches(url: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| url.contains(pattern))
}
