use crate::{Error, Result};
use chromiumoxide::Page;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use serde_json::Value;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A publishing-form tab plus the evaluation deadline applied to every
/// script run in it.
pub struct FormPage {
    page: Page,
    eval_timeout: Duration,
}

impl FormPage {
    pub fn new(page: Page, eval_timeout: Duration) -> Self {
        FormPage { page, eval_timeout }
    }

    pub async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    /// Evaluate a script, resolving promises and returning the value as
    /// JSON. The whole round trip is bounded by the eval timeout so a
    /// wedged tab cannot hang a fill pass.
    pub async fn evaluate(&self, expression: &str) -> Result<Value> {
        let params = EvaluateParams::builder()
            .expression(expression)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(|e| Error::Cdp(format!("evaluate invalid params: {e}")))?;

        let result = tokio::time::timeout(self.eval_timeout, self.page.evaluate_expression(params))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "page evaluation did not finish within {:?}",
                    self.eval_timeout
                ))
            })??;

        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    /// Poll until the document has finished parsing.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let state = self.evaluate("document.readyState").await?;
            if document_ready(&state) {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::Timeout(format!(
                    "page did not become ready within {timeout:?}"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

// `interactive` is enough: the form is parsed and scriptable even while
// subresources are still loading.
fn document_ready(state: &Value) -> bool {
    matches!(state.as_str(), Some("interactive") | Some("complete"))
}
