//! Drives a single form control: classify it, write into it, wait for the
//! page to settle.

use crate::driver::PageDriver;
use crate::outcome::{ControlKind, ScriptOutcome, parse_classification, parse_outcome};
use crate::script;
use crate::{Error, Result};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timing for one fill pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPolicy {
    /// Poll for effects instead of sleeping fixed intervals.
    pub adaptive: bool,
    /// Fixed pause after a text write.
    pub settle: Duration,
    /// Fixed pause after opening a widget.
    pub widget_settle: Duration,
    /// Deadline for one adaptive poll.
    pub wait_timeout: Duration,
}

impl Default for FillPolicy {
    fn default() -> Self {
        FillPolicy {
            adaptive: true,
            settle: Duration::from_millis(300),
            widget_settle: Duration::from_millis(500),
            wait_timeout: Duration::from_millis(2000),
        }
    }
}

impl From<&gazza_core::config::FillConfig> for FillPolicy {
    fn from(config: &gazza_core::config::FillConfig) -> Self {
        FillPolicy {
            adaptive: config.adaptive_waits,
            settle: Duration::from_millis(config.settle_ms),
            widget_settle: Duration::from_millis(config.widget_settle_ms),
            wait_timeout: Duration::from_millis(config.wait_timeout_ms),
        }
    }
}

#[cfg(test)]
impl FillPolicy {
    /// Fixed-delay policy with all pauses zeroed, for deterministic call
    /// sequences.
    pub(crate) fn immediate() -> Self {
        FillPolicy {
            adaptive: false,
            settle: Duration::ZERO,
            widget_settle: Duration::ZERO,
            wait_timeout: Duration::ZERO,
        }
    }
}

/// What a text write ended as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWrite {
    Written { verified: bool },
    /// The control vanished between classification and the write.
    Gone,
}

pub struct Injector<'a, D: PageDriver> {
    driver: &'a D,
    policy: &'a FillPolicy,
}

impl<'a, D: PageDriver> Injector<'a, D> {
    pub fn new(driver: &'a D, policy: &'a FillPolicy) -> Self {
        Injector { driver, policy }
    }

    /// What does the chain resolve to, if anything?
    pub async fn classify(&self, chain: &str) -> Result<Option<ControlKind>> {
        let value = self.driver.eval(script::classify(chain)).await?;
        parse_classification(&value)
    }

    /// Write a text value and wait for it to stick. `verified` is always
    /// true in fixed-delay mode, which sleeps instead of reading back.
    pub async fn inject_text(
        &self,
        chain: &str,
        value: &str,
        kind: ControlKind,
    ) -> Result<TextWrite> {
        let editable = kind == ControlKind::Editable;
        let reply = self.driver.eval(script::set_text(chain, value, editable)).await?;
        match parse_outcome(&reply)? {
            ScriptOutcome::Filled => {}
            ScriptOutcome::NotFound => return Ok(TextWrite::Gone),
            ScriptOutcome::Error { message } => return Err(Error::Script(message)),
            other => {
                return Err(Error::Protocol(format!("unexpected reply to write: {other:?}")));
            }
        }

        if self.policy.adaptive {
            let verified = self.verify_write(chain, value, editable).await?;
            Ok(TextWrite::Written { verified })
        } else {
            tokio::time::sleep(self.policy.settle).await;
            Ok(TextWrite::Written { verified: true })
        }
    }

    async fn verify_write(&self, chain: &str, expected: &str, editable: bool) -> Result<bool> {
        let deadline = tokio::time::Instant::now() + self.policy.wait_timeout;
        loop {
            let reply = self.driver.eval(script::read_value(chain, editable)).await?;
            if let Some(current) = reply.get("value").and_then(|v| v.as_str()) {
                if current.trim() == expected.trim() {
                    return Ok(true);
                }
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::debug!(
                    "write to {chain} not confirmed within {:?}",
                    self.policy.wait_timeout
                );
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Resolve a native select. The option swap itself is synchronous, so
    /// adaptive mode has nothing to poll for; fixed mode still pauses to
    /// let dependent controls re-render.
    pub async fn select_native(&self, chain: &str, desired: &str) -> Result<ScriptOutcome> {
        let reply = self.driver.eval(script::select_option(chain, desired)).await?;
        match parse_outcome(&reply)? {
            ScriptOutcome::Error { message } => Err(Error::Script(message)),
            outcome @ ScriptOutcome::Selected { .. } => {
                if !self.policy.adaptive {
                    tokio::time::sleep(self.policy.settle).await;
                }
                Ok(outcome)
            }
            outcome => Ok(outcome),
        }
    }

    /// Open a custom widget, wait for its options, pick one.
    pub async fn select_widget(&self, chain: &str, desired: &str) -> Result<ScriptOutcome> {
        let open = self.driver.eval(script::click(chain)).await?;
        match parse_outcome(&open)? {
            ScriptOutcome::Clicked => {}
            ScriptOutcome::NotFound => return Ok(ScriptOutcome::NotFound),
            ScriptOutcome::Error { message } => return Err(Error::Script(message)),
            other => {
                return Err(Error::Protocol(format!("unexpected reply to click: {other:?}")));
            }
        }

        if self.policy.adaptive {
            self.wait_widget_options().await?;
        } else {
            tokio::time::sleep(self.policy.widget_settle).await;
        }

        let picked = self.driver.eval(script::pick_widget_option(desired)).await?;
        match parse_outcome(&picked)? {
            ScriptOutcome::Error { message } => Err(Error::Script(message)),
            outcome @ ScriptOutcome::Picked { .. } => {
                // an option click is synchronous; only fixed mode pauses
                if !self.policy.adaptive {
                    tokio::time::sleep(self.policy.settle).await;
                }
                Ok(outcome)
            }
            outcome => Ok(outcome),
        }
    }

    /// Poll until option nodes appear or the wait times out. A timeout is
    /// not an error; the scan simply sees whatever is there.
    async fn wait_widget_options(&self) -> Result<()> {
        let deadline = tokio::time::Instant::now() + self.policy.wait_timeout;
        loop {
            let reply = self.driver.eval(script::count_widget_options()).await?;
            let count = reply.get("count").and_then(|v| v.as_u64()).unwrap_or(0);
            if count > 0 {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::debug!(
                    "no widget options appeared within {:?}",
                    self.policy.wait_timeout
                );
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
