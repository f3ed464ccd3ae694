use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// The log keeps at most this many entries; the oldest go first.
pub const MAX_LOG_ENTRIES: usize = 500;

/// Local timestamps in the `dd/mm/yyyy, HH:MM:SS` shape the log has always
/// carried.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Action tokens recorded by the CLI.
pub mod actions {
    pub const LOAD_AIRTABLE: &str = "LOAD_AIRTABLE";
    pub const COMPILE_FORM: &str = "COMPILE_FORM";
    pub const UPDATE_STATUS: &str = "UPDATE_STATUS";
    pub const ADD_CATEGORY: &str = "ADD_CATEGORY";
    pub const REMOVE_CATEGORY: &str = "REMOVE_CATEGORY";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Error,
    Warning,
    Info,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Success => "success",
            ActivityStatus::Error => "error",
            ActivityStatus::Warning => "warning",
            ActivityStatus::Info => "info",
        }
    }
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub action: String,
    pub status: ActivityStatus,
    #[serde(default)]
    pub details: String,
}

impl ActivityEntry {
    /// Entry stamped with the current local time.
    pub fn now(action: &str, status: ActivityStatus, details: impl Into<String>) -> Self {
        ActivityEntry {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            action: action.to_string(),
            status,
            details: details.into(),
        }
    }
}

/// JSON-file backed activity log with a FIFO size cap.
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ActivityLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, oldest first. A missing file reads as an empty log.
    pub fn entries(&self) -> Result<Vec<ActivityEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Append an entry, dropping the oldest ones past the cap.
    pub fn append(&self, entry: ActivityEntry) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(entry);
        while entries.len() > MAX_LOG_ENTRIES {
            entries.remove(0);
        }
        self.write(&entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.write(&[])
    }

    fn write(&self, entries: &[ActivityEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, entries)?;
        tracing::debug!(
            "Wrote {} activity entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
