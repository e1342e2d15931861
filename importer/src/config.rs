//! Run configuration: API address and file locations.
//!
//! Defaults reproduce the fixed setup of the import tool, so a run with no
//! arguments reads `input.tsv`, writes `output.json` and talks to the API on
//! `localhost:3005`.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::models::RecordId;

/// Default API base address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3005";

/// Default input file
pub const DEFAULT_INPUT: &str = "input.tsv";

/// Default action log file
pub const DEFAULT_OUTPUT: &str = "output.json";

/// Environment variable overriding the API base address
pub const ENV_BASE_URL: &str = "SHEETDB_API_URL";

/// Environment variable overriding the input file
pub const ENV_INPUT: &str = "SHEETDB_INPUT";

/// Environment variable overriding the output file
pub const ENV_OUTPUT: &str = "SHEETDB_OUTPUT";

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// API base address without trailing slash
    pub base_url: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl ImportConfig {
    /// Create a config, validating and normalizing the base URL.
    pub fn new(
        base_url: &str,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            input: input.into(),
            output: output.into(),
        })
    }

    /// `{base}/personen`
    pub fn persons_url(&self) -> String {
        format!("{}/personen", self.base_url)
    }

    /// `{base}/stuecke`
    pub fn pieces_url(&self) -> String {
        format!("{}/stuecke", self.base_url)
    }

    /// `{base}/stuecke/{id}`
    pub fn piece_url(&self, id: &RecordId) -> String {
        format!("{}/stuecke/{}", self.base_url, id)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
