//! Reconciliation of input rows against the remote store.
//!
//! - Person: name → id, with run cache and create-if-absent
//! - Piece: row → create or update, using a fresh snapshot per row
//! - Pipeline: whole-run orchestration
//! - Stats: counters for skipped rows and failed calls

pub mod person;
pub mod piece;
pub mod pipeline;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use person::PersonResolver;
pub use piece::PieceReconciler;
pub use pipeline::{import_rows, run_import, run_import_with, ImportReport};
pub use stats::{PersonStats, PieceStats, RunStats};
