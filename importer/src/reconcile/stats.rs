//! Counters for one import run.

use serde::Serialize;

/// Person resolution counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStats {
    /// Names answered from the run cache
    pub cache_hits: usize,
    /// Names found in the remote collection
    pub matched: usize,
    pub created: usize,
    /// Failed `GET /personen` calls (fell through to creation)
    pub lookup_failures: usize,
    /// Failed `POST /personen` calls (name left out of the piece)
    pub create_failures: usize,
}

/// Piece reconciliation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceStats {
    pub created: usize,
    pub updated: usize,
    /// Create or update calls that failed
    pub failed: usize,
    /// Failed `GET /stuecke` calls (treated as an empty snapshot)
    pub snapshot_failures: usize,
}

/// Everything counted during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Data rows with at least five fields
    pub rows_read: usize,
    /// Data rows skipped for having fewer than five fields
    pub rows_skipped: usize,
    pub persons: PersonStats,
    pub pieces: PieceStats,
}

impl RunStats {
    /// Summary lines for the console.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Rows:     {} processed, {} skipped", self.rows_read, self.rows_skipped),
            format!(
                "Pieces:   {} created, {} updated, {} failed",
                self.pieces.created, self.pieces.updated, self.pieces.failed
            ),
            format!(
                "Persons:  {} matched, {} created, {} cached, {} failed",
                self.persons.matched,
                self.persons.created,
                self.persons.cache_hits,
                self.persons.create_failures
            ),
        ]
    }

    /// True when no remote call failed and no row was skipped.
    pub fn is_clean(&self) -> bool {
        self.rows_skipped == 0
            && self.pieces.failed == 0
            && self.pieces.snapshot_failures == 0
            && self.persons.lookup_failures == 0
            && self.persons.create_failures == 0
    }
}
