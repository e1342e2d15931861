//! Action log: one entry per processed row, written once at the end of a run.
//!
//! The file is a pretty-printed JSON array in input row order. Non-ASCII
//! characters are written as-is.

use std::path::Path;

use crate::error::OutputError;
use crate::models::ActionLogEntry;

/// Append-only, ordered log of reconciliation results.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ActionLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Write the whole log to `path`. The in-memory log is left untouched
    /// whether or not the write succeeds.
    pub async fn flush(&self, path: &Path) -> Result<(), OutputError> {
        let json = self.to_json()?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
