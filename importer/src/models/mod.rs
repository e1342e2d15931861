//! Domain models for the sheet import.
//!
//! - [`PersonName`] - parsed composer/arranger name, used as lookup key
//! - [`PersonRecord`] / [`NewPerson`] - persons as stored by the remote API
//! - [`PieceRecord`] / [`PiecePayload`] - pieces as stored by the remote API
//! - [`PieceRow`] - one data row of the TSV input
//! - [`ActionLogEntry`] - one entry of the output log
//!
//! Wire names follow the Sheet Database API (`pid`, `vorname`, `stid`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque identifier assigned by the remote store.
///
/// The API uses integers, but string ids are accepted and echoed back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Read an identifier out of a JSON object field.
    pub fn from_field(value: &Value, field: &str) -> Option<Self> {
        match value.get(field)? {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Persons
// =============================================================================

/// A structured person name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

impl PersonName {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }

    /// Cache key: `"{given} {family}"`, trimmed.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.given, self.family).trim().to_string()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

/// A person as returned by `GET /personen`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonRecord {
    #[serde(rename = "pid")]
    pub id: RecordId,
    #[serde(rename = "vorname", default)]
    pub given: Option<String>,
    #[serde(rename = "name", default)]
    pub family: Option<String>,
}

impl PersonRecord {
    /// Exact field equality on both family and given name.
    pub fn matches(&self, name: &PersonName) -> bool {
        self.family.as_deref() == Some(name.family.as_str())
            && self.given.as_deref() == Some(name.given.as_str())
    }
}

/// Body of `POST /personen`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewPerson {
    #[serde(rename = "vorname")]
    pub given: String,
    #[serde(rename = "name")]
    pub family: String,
}

impl From<&PersonName> for NewPerson {
    fn from(name: &PersonName) -> Self {
        Self {
            given: name.given.clone(),
            family: name.family.clone(),
        }
    }
}

// =============================================================================
// Pieces
// =============================================================================

/// A piece as returned by `GET /stuecke`.
///
/// Only `stid` and `name` take part in reconciliation. Other fields are
/// ignored so their shape never affects matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieceRecord {
    #[serde(rename = "stid")]
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
}

impl PieceRecord {
    /// Exact, case-sensitive title equality.
    pub fn matches(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Body of `POST /stuecke` and `PUT /stuecke/{id}`.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PiecePayload {
    pub name: String,
    pub genre: String,
    #[serde(rename = "isdigitalisiert")]
    pub is_digitized: bool,
    pub composer_ids: Vec<RecordId>,
    pub arranger_ids: Vec<RecordId>,
}

/// One data row of the TSV input, fields untrimmed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieceRow {
    pub name: String,
    pub composers: String,
    pub arrangers: String,
    pub genre: String,
    pub digitized: String,
}

impl PieceRow {
    /// Build a row from the first five fields; `None` if fewer are present.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        if fields.len() < 5 {
            return None;
        }
        Some(Self {
            name: fields[0].as_ref().to_string(),
            composers: fields[1].as_ref().to_string(),
            arrangers: fields[2].as_ref().to_string(),
            genre: fields[3].as_ref().to_string(),
            digitized: fields[4].as_ref().to_string(),
        })
    }

    /// `TRUE` in any case, surrounding whitespace ignored.
    pub fn is_digitized(&self) -> bool {
        self.digitized.trim().to_uppercase() == "TRUE"
    }

    pub fn composer_names(&self) -> Vec<&str> {
        split_names(&self.composers)
    }

    pub fn arranger_names(&self) -> Vec<&str> {
        split_names(&self.arrangers)
    }
}

/// Split a multi-valued name field on `;`, dropping empty segments.
pub fn split_names(field: &str) -> Vec<&str> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// =============================================================================
// Action Log
// =============================================================================

/// Create-or-update decision for one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Update,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Create => f.write_str("create"),
            ActionKind::Update => f.write_str("update"),
        }
    }
}

/// Result of the create/update call.
///
/// Serialized as a single `response`, `error` or `exception` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Decoded body of a successful response.
    Response(Value),
    /// Body text of a non-success response.
    Error(String),
    /// Transport or decoding failure.
    Exception(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Response(_))
    }
}

/// One processed row in the output log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    #[serde(rename = "stueck")]
    pub piece: String,
    pub action: ActionKind,
    pub payload: PiecePayload,
    #[serde(flatten)]
    pub outcome: Outcome,
}

// =============================================================================
// Tests
// =============================================================================
