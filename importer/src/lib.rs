//! # Sheet Import - TSV batch import into the Sheet Database
//!
//! Reads a tab-separated export of sheet music pieces, resolves or creates
//! their composers and arrangers, and creates or updates every piece through
//! the Sheet Database REST API. Every request/response pair ends up in a JSON
//! action log.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  input.tsv  │────▶│ Row Reader  │────▶│ Piece Reconciler│────▶│ output.json │
//! │ (UTF8/ISO)  │     │ (auto-enc)  │     │ (+ Person       │     │ (action log)│
//! └─────────────┘     └─────────────┘     │    Resolver)    │     └─────────────┘
//!                                         └────────┬────────┘
//!                                                  ▼
//!                                         ┌─────────────────┐
//!                                         │  REST API       │
//!                                         │ /personen       │
//!                                         │ /stuecke        │
//!                                         └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sheet_import::{run_import, ImportConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stats = run_import(&ImportConfig::default()).await.unwrap();
//!     println!("{} created, {} updated", stats.pieces.created, stats.pieces.updated);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - API address and file locations
//! - [`models`] - Persons, pieces, rows and log entries
//! - [`parser`] - TSV reading and the person name heuristic
//! - [`client`] - Remote store trait and HTTP implementation
//! - [`reconcile`] - Person resolver, piece reconciler, run pipeline
//! - [`output`] - Action log
//! - [`logs`] - Console logging

// Core modules
pub mod error;
pub mod config;
pub mod models;

// Input
pub mod parser;

// Remote API
pub mod client;

// Reconciliation
pub mod reconcile;

// Output
pub mod output;
pub mod logs;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    ApiError,
    ReaderError,
    OutputError,
    ConfigError,
    ImportError,
    ApiResult,
    ImportResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    RecordId,
    PersonName,
    PersonRecord,
    NewPerson,
    PieceRecord,
    PiecePayload,
    PieceRow,
    ActionKind,
    Outcome,
    ActionLogEntry,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::ImportConfig;

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    parse_person_name,
    parse_tsv,
    parse_bytes_auto,
    read_rows,
    detect_encoding,
    decode_content,
    ParsedRows,
};

// =============================================================================
// Re-exports - Remote store
// =============================================================================

pub use client::{HttpStore, RemoteStore};

// =============================================================================
// Re-exports - Reconciliation
// =============================================================================

pub use reconcile::{
    PersonResolver,
    PieceReconciler,
    import_rows,
    run_import,
    run_import_with,
    ImportReport,
    RunStats,
    PersonStats,
    PieceStats,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use output::ActionLog;
