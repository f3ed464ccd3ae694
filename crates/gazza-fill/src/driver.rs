use crate::{Error, Result};
use async_trait::async_trait;
use gazza_browser::FormPage;
use serde_json::Value;

/// The one seam between the fill engine and a real browser tab. Everything
/// above it runs unchanged against a scripted driver in tests.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Run a script in the page and return its JSON value.
    async fn eval(&self, script: String) -> Result<Value>;
}

#[async_trait]
impl PageDriver for FormPage {
    async fn eval(&self, script: String) -> Result<Value> {
        self.evaluate(&script).await.map_err(|e| Error::Driver(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted driver: hands out queued replies in order and records every
    /// script it sees.
    pub struct MockDriver {
        replies: Mutex<VecDeque<Value>>,
        calls: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl MockDriver {
        pub fn new(replies: Vec<Value>) -> Self {
            MockDriver {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageDriver for MockDriver {
        async fn eval(&self, script: String) -> Result<Value> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.calls.lock().unwrap().push(script);
            let reply = self.replies.lock().unwrap().pop_front();
            Ok(reply.unwrap_or_else(|| {
                serde_json::json!({ "outcome": "error", "message": "unscripted page call" })
            }))
        }
    }
}
