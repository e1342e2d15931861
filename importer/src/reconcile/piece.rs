//! Piece reconciliation: one TSV row → create or update.
//!
//! Every row re-fetches the full piece collection, so the create/update
//! decision always sees the latest remote state, including pieces created by
//! earlier rows of the same run. Matching is by exact, case-sensitive name;
//! the first match wins.

use std::collections::HashMap;

use super::person::PersonResolver;
use super::stats::{PersonStats, PieceStats};
use crate::client::RemoteStore;
use crate::error::ApiError;
use crate::logs::{log_error, log_success, log_warning};
use crate::models::{ActionKind, ActionLogEntry, Outcome, PiecePayload, PieceRow, RecordId};

/// Create-or-update driver for pieces. Owns the person resolver and both
/// run caches.
#[derive(Debug, Default)]
pub struct PieceReconciler {
    persons: PersonResolver,
    piece_ids: HashMap<String, RecordId>,
    stats: PieceStats,
}

impl PieceReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve persons, build the payload and push it to the remote store.
    ///
    /// Never fails: remote errors end up in the returned entry.
    pub async fn reconcile<S: RemoteStore>(&mut self, store: &S, row: &PieceRow) -> ActionLogEntry {
        let payload = self.build_payload(store, row).await;
        let name = payload.name.clone();

        let existing = match store.list_pieces().await {
            Ok(pieces) => pieces.into_iter().find(|p| p.matches(&name)).map(|p| p.id),
            Err(e) => {
                self.stats.snapshot_failures += 1;
                log_warning(format!("GET error for stücke: {}", e));
                None
            }
        };

        match existing {
            Some(id) => self.update(store, id, payload).await,
            None => self.create(store, payload).await,
        }
    }

    /// Payload for a row, with composer and arranger names resolved to ids.
    pub async fn build_payload<S: RemoteStore>(&mut self, store: &S, row: &PieceRow) -> PiecePayload {
        let composer_ids = self.persons.resolve_all(store, &row.composer_names()).await;
        let arranger_ids = self.persons.resolve_all(store, &row.arranger_names()).await;

        PiecePayload {
            name: row.name.trim().to_string(),
            genre: row.genre.trim().to_string(),
            is_digitized: row.is_digitized(),
            composer_ids,
            arranger_ids,
        }
    }

    async fn update<S: RemoteStore>(&mut self, store: &S, id: RecordId, payload: PiecePayload) -> ActionLogEntry {
        let name = payload.name.clone();
        self.piece_ids.insert(name.clone(), id.clone());

        let outcome = match store.update_piece(&id, &payload).await {
            Ok(response) => {
                self.stats.updated += 1;
                log_success(format!("Updated stück: '{}'", name));
                Outcome::Response(response)
            }
            Err(e) => {
                self.stats.failed += 1;
                log_error(format!("Error updating stück '{}': {}", name, e));
                failure_outcome(e)
            }
        };

        ActionLogEntry { piece: name, action: ActionKind::Update, payload, outcome }
    }

    async fn create<S: RemoteStore>(&mut self, store: &S, payload: PiecePayload) -> ActionLogEntry {
        let name = payload.name.clone();

        let outcome = match store.create_piece(&payload).await {
            Ok(response) => {
                self.stats.created += 1;
                match RecordId::from_field(&response, "stid") {
                    Some(id) => {
                        self.piece_ids.insert(name.clone(), id);
                    }
                    None => log_warning(format!("Created stück '{}' came back without stid", name)),
                }
                log_success(format!("Created stück: '{}'", name));
                Outcome::Response(response)
            }
            Err(e) => {
                self.stats.failed += 1;
                log_error(format!("Error creating stück '{}': {}", name, e));
                failure_outcome(e)
            }
        };

        ActionLogEntry { piece: name, action: ActionKind::Create, payload, outcome }
    }

    /// Last known id for a piece name.
    pub fn piece_id(&self, name: &str) -> Option<&RecordId> {
        self.piece_ids.get(name)
    }

    pub fn persons(&self) -> &PersonResolver {
        &self.persons
    }

    pub fn stats(&self) -> PieceStats {
        self.stats
    }

    pub fn person_stats(&self) -> PersonStats {
        self.persons.stats()
    }
}

/// Non-success responses keep their body; everything else is an exception.
fn failure_outcome(err: ApiError) -> Outcome {
    match err {
        ApiError::Remote { body, .. } => Outcome::Error(body),
        other => Outcome::Exception(other.to_string()),
    }
}
