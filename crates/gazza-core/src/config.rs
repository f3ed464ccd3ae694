use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref ENV_VAR: Regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// Contents written to `config.toml` by `gazza init`.
pub const DEFAULT_CONFIG: &str = r#"# gazza configuration
#
# `${VAR}` values are expanded from the environment when the file is loaded.

[airtable]
# Personal access token, sent as a Bearer token.
api_key = "${AIRTABLE_API_KEY}"
# The base that holds the listings table (appXXXXXXXXXXXXXX).
base_id = ""
table = "Annunci"

[browser]
# Uncomment to pin a browser binary instead of autodetecting one.
# chrome_path = "/usr/bin/google-chrome"
debug_port = 9222

[fill]
# Poll for the effect of each injection instead of sleeping fixed delays.
adaptive_waits = true
settle_ms = 300
widget_settle_ms = 500
wait_timeout_ms = 2000
eval_timeout_ms = 10000
"#;

/// Top-level configuration, loaded from `config.toml` in the data
/// directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub airtable: AirtableConfig,
    pub browser: BrowserConfig,
    pub fill: FillConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub table: String,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        AirtableConfig {
            api_key: String::new(),
            base_id: String::new(),
            table: "Annunci".to_string(),
        }
    }
}

impl AirtableConfig {
    /// True once the key, base, and table have all been filled in.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.base_id.is_empty() && !self.table.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Browser binary override; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
    /// DevTools debugging port used both for launches and `--port` attaches.
    pub debug_port: u16,
    /// Persistent profile override; defaults to `<data dir>/profile`.
    pub profile_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            chrome_path: None,
            debug_port: 9222,
            profile_dir: None,
        }
    }
}

/// Timing knobs for a fill pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Poll for the effect of each injection instead of sleeping a fixed
    /// interval.
    pub adaptive_waits: bool,
    /// Pause after writing a value, when adaptive waits are off.
    pub settle_ms: u64,
    /// Pause after opening a custom dropdown, when adaptive waits are off.
    pub widget_settle_ms: u64,
    /// Upper bound for one adaptive condition poll.
    pub wait_timeout_ms: u64,
    /// Hard deadline for a single page evaluation.
    pub eval_timeout_ms: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        FillConfig {
            adaptive_waits: true,
            settle_ms: 300,
            widget_settle_ms: 500,
            wait_timeout_ms: 2000,
            eval_timeout_ms: 10_000,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    pub fn load_str(content: &str) -> Result<Config> {
        let expanded = expand_env_vars(content)?;
        Ok(toml::from_str(&expanded)?)
    }
}

/// Replace `${VAR}` references with environment values. An unset variable
/// is an error so a half-configured file fails loudly.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut missing: Option<String> = None;
    let expanded = ENV_VAR.replace_all(content, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match std::env::var(name) {
            Ok(value) => value,
            Err(_) => {
                if missing.is_none() {
                    missing = Some(name.to_string());
                }
                String::new()
            }
        }
    });
    if let Some(name) = missing {
        return Err(Error::EnvVar(name));
    }
    Ok(expanded.into_owned())
}
