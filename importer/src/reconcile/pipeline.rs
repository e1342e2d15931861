//! Whole-run orchestration: read rows, reconcile each, write the log.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheet_import::{run_import, ImportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stats = run_import(&ImportConfig::default()).await?;
//!     println!("{} pieces created", stats.pieces.created);
//!     Ok(())
//! }
//! ```

use super::piece::PieceReconciler;
use super::stats::RunStats;
use crate::client::{HttpStore, RemoteStore};
use crate::config::ImportConfig;
use crate::error::ImportResult;
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::models::PieceRow;
use crate::output::ActionLog;
use crate::parser::read_rows;

/// Result of reconciling a batch of rows.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub log: ActionLog,
    pub stats: RunStats,
}

/// Reconcile rows one after another against `store`.
///
/// Each row is finished (persons, snapshot, create/update) before the next
/// one starts. Remote failures never stop the batch.
pub async fn import_rows<S: RemoteStore>(store: &S, rows: &[PieceRow]) -> ImportReport {
    let mut reconciler = PieceReconciler::new();
    let mut log = ActionLog::new();

    for (i, row) in rows.iter().enumerate() {
        log_info(format!("[{}/{}] {}", i + 1, rows.len(), row.name.trim()));
        let entry = reconciler.reconcile(store, row).await;
        log.record(entry);
    }

    let stats = RunStats {
        rows_read: rows.len(),
        rows_skipped: 0,
        persons: reconciler.person_stats(),
        pieces: reconciler.stats(),
    };

    ImportReport { log, stats }
}

/// Run a full import against `store`: read the input, reconcile every row
/// and write the action log.
///
/// Unreadable input aborts before any remote call. An unwritable output
/// aborts after all rows were processed.
pub async fn run_import_with<S: RemoteStore>(store: &S, config: &ImportConfig) -> ImportResult<RunStats> {
    log_info(format!("📖 Reading {}...", config.input.display()));
    let parsed = read_rows(&config.input).await.map_err(|e| {
        log_error(format!("Error reading {}: {}", config.input.display(), e));
        e
    })?;
    log_success(format!(
        "Read {} rows ({}), {} skipped",
        parsed.rows.len(),
        parsed.encoding,
        parsed.skipped
    ));
    if parsed.skipped > 0 {
        log_warning(format!("{} rows with fewer than 5 fields skipped", parsed.skipped));
    }

    log_info(format!("🔄 Importing into {}...", config.base_url));
    let mut report = import_rows(store, &parsed.rows).await;
    report.stats.rows_skipped = parsed.skipped;

    report.log.flush(&config.output).await.map_err(|e| {
        log_error(format!("Error writing {}: {}", config.output.display(), e));
        e
    })?;
    log_success(format!("API responses written to {}", config.output.display()));

    for line in report.stats.summary_lines() {
        log_info(line);
    }

    Ok(report.stats)
}

/// Run a full import over HTTP.
pub async fn run_import(config: &ImportConfig) -> ImportResult<RunStats> {
    let store = HttpStore::new(config.clone())?;
    run_import_with(&store, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ImportError, ReaderError};
    use crate::models::{ActionKind, NewPerson, RecordId};
    use crate::reconcile::testing::{Call, MemoryStore};
    use std::fs;

    const HEADER: &str =
        "Name\tKomponist / Künstler\tArrangiert von\tGenre\tSind Noten digital vorhanden?\n";

    fn config_in(dir: &tempfile::TempDir, input: &str) -> ImportConfig {
        let input_path = dir.path().join("input.tsv");
        fs::write(&input_path, input).unwrap();
        ImportConfig::new("http://localhost:3005", input_path, dir.path().join("output.json")).unwrap()
    }

    #[tokio::test]
    async fn test_single_row_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            &dir,
            &format!("{}Symphony No. 5\tBeethoven\t\tClassical\tTRUE\n", HEADER),
        );
        let store = MemoryStore::new();

        let stats = run_import_with(&store, &config).await.unwrap();

        assert_eq!(
            store.calls()[..3],
            [
                Call::ListPersons,
                Call::CreatePerson(NewPerson { given: "".into(), family: "Beethoven".into() }),
                Call::ListPieces,
            ]
        );
        assert!(matches!(store.calls()[3], Call::CreatePiece(_)));
        assert_eq!(store.calls().len(), 4);

        let written = fs::read_to_string(&config.output).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&written).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["action"], "create");
        assert_eq!(entries[0]["payload"]["composerIds"].as_array().unwrap().len(), 1);
        assert_eq!(stats.pieces.created, 1);
        assert!(stats.is_clean());
    }

    #[tokio::test]
    async fn test_skipped_rows_counted() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            &dir,
            &format!("{}Kanon\tPachelbel\t\tBarock\tFALSE\nkaputt\n", HEADER),
        );
        let store = MemoryStore::new();

        let stats = run_import_with(&store, &config).await.unwrap();

        assert_eq!(stats.rows_read, 1);
        assert_eq!(stats.rows_skipped, 1);
        assert!(!stats.is_clean());
    }

    #[tokio::test]
    async fn test_unreadable_input_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = ImportConfig::new(
            "http://localhost:3005",
            dir.path().join("nope.tsv"),
            dir.path().join("output.json"),
        )
        .unwrap();
        let store = MemoryStore::new();

        let err = run_import_with(&store, &config).await.unwrap_err();

        assert!(matches!(err, ImportError::Reader(ReaderError::Io(_))));
        assert!(store.calls().is_empty());
        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn test_empty_input_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, "");
        let store = MemoryStore::new();

        let err = run_import_with(&store, &config).await.unwrap_err();

        assert!(matches!(err, ImportError::Reader(ReaderError::Empty)));
        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn test_rows_keep_input_order_despite_failures() {
        let store = MemoryStore::new()
            .with_piece(9, "B")
            .failing_piece_update(crate::error::ApiError::Remote { status: 500, body: "boom".into() });
        let rows: Vec<PieceRow> = ["A", "B", "C"]
            .iter()
            .map(|n| PieceRow { name: n.to_string(), ..Default::default() })
            .collect();

        let report = import_rows(&store, &rows).await;

        let names: Vec<&str> = report.log.entries().iter().map(|e| e.piece.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(report.log.entries()[1].action, ActionKind::Update);
        assert_eq!(report.stats.pieces.failed, 1);
        assert_eq!(report.stats.pieces.created, 2);
    }

    #[tokio::test]
    async fn test_person_shared_across_rows() {
        let store = MemoryStore::new();
        let rows = vec![
            PieceRow { name: "Symphony No. 5".into(), composers: "Beethoven".into(), ..Default::default() },
            PieceRow { name: "Symphony No. 9".into(), composers: "Beethoven".into(), ..Default::default() },
        ];

        let report = import_rows(&store, &rows).await;

        let person_creates = store
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::CreatePerson(_)))
            .count();
        assert_eq!(person_creates, 1);
        assert_eq!(report.stats.persons.cache_hits, 1);
        assert_eq!(
            report.log.entries()[1].payload.composer_ids,
            vec![RecordId::Int(101)]
        );
    }
}
