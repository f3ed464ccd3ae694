//! In-page toasts, the only feedback surface the seller sees while the
//! form tab has focus.

use crate::driver::PageDriver;
use crate::outcome::{ScriptOutcome, parse_outcome};
use crate::script;
use crate::{Error, Result};

/// How long a toast stays on screen.
pub const TOAST_DISPLAY_MS: u64 = 3000;
/// Exit animation length; the node is removed afterwards.
pub const TOAST_EXIT_MS: u64 = 300;

pub const SUCCESS_COLOR: &str = "#28a745";
pub const ERROR_COLOR: &str = "#dc3545";
pub const WARNING_COLOR: &str = "#ffc107";
pub const INFO_COLOR: &str = "#17a2b8";

/// Toast category; unknown wire values fall back to info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastCategory {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastCategory {
    pub fn from_wire(value: &str) -> ToastCategory {
        match value {
            "success" => ToastCategory::Success,
            "error" => ToastCategory::Error,
            "warning" => ToastCategory::Warning,
            _ => ToastCategory::Info,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ToastCategory::Success => SUCCESS_COLOR,
            ToastCategory::Error => ERROR_COLOR,
            ToastCategory::Warning => WARNING_COLOR,
            ToastCategory::Info => INFO_COLOR,
        }
    }
}

/// Float a toast in the page. The caller decides whether a missed toast
/// matters.
pub async fn show_toast<D: PageDriver>(
    driver: &D,
    message: &str,
    category: ToastCategory,
) -> Result<()> {
    let reply = driver
        .eval(script::toast(message, category.color(), TOAST_DISPLAY_MS, TOAST_EXIT_MS))
        .await?;
    match parse_outcome(&reply)? {
        ScriptOutcome::Shown => Ok(()),
        ScriptOutcome::Error { message } => Err(Error::Script(message)),
        other => Err(Error::Protocol(format!("unexpected reply to toast: {other:?}"))),
    }
}
