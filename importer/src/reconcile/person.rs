//! Person resolution: raw name → remote identifier.
//!
//! ```text
//! raw name ─▶ parse ─▶ cache? ──hit──▶ id
//!                         │miss
//!                         ▼
//!                  GET /personen ──match──▶ cache, id
//!                         │no match / error
//!                         ▼
//!                  POST /personen ──ok──▶ cache, id
//!                         │error
//!                         ▼
//!                        None
//! ```
//!
//! Within one resolver the same name triggers at most one lookup-or-create
//! sequence. A failed sequence is not cached, so a later occurrence of the
//! name tries again.

use std::collections::HashMap;

use super::stats::PersonStats;
use crate::client::RemoteStore;
use crate::logs::{log_info_indent, log_warning_indent};
use crate::models::{NewPerson, RecordId};
use crate::parser::parse_person_name;

/// Resolves names to person ids, caching results for the lifetime of a run.
#[derive(Debug, Default)]
pub struct PersonResolver {
    cache: HashMap<String, RecordId>,
    stats: PersonStats,
}

impl PersonResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve one raw name. `None` for blank names and failed creations.
    pub async fn resolve<S: RemoteStore>(&mut self, store: &S, raw: &str) -> Option<RecordId> {
        let name = parse_person_name(raw)?;
        let key = name.cache_key();

        if let Some(id) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            return Some(id.clone());
        }

        match store.list_persons().await {
            Ok(persons) => {
                if let Some(found) = persons.iter().find(|p| p.matches(&name)) {
                    self.stats.matched += 1;
                    self.cache.insert(key, found.id.clone());
                    return Some(found.id.clone());
                }
            }
            Err(e) => {
                self.stats.lookup_failures += 1;
                log_warning_indent(format!("GET error for person '{}': {}", raw, e), 1);
            }
        }

        match store.create_person(&NewPerson::from(&name)).await {
            Ok(id) => {
                self.stats.created += 1;
                log_info_indent(format!("Created person '{}' ({})", key, id), 1);
                self.cache.insert(key, id.clone());
                Some(id)
            }
            Err(e) => {
                self.stats.create_failures += 1;
                log_warning_indent(format!("Error creating person '{}': {}", raw, e), 1);
                None
            }
        }
    }

    /// Resolve names in order, leaving out the ones that fail.
    pub async fn resolve_all<S: RemoteStore>(&mut self, store: &S, names: &[&str]) -> Vec<RecordId> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            if let Some(id) = self.resolve(store, name).await {
                ids.push(id);
            }
        }
        ids
    }

    /// Cached id for a raw name, without any remote call.
    pub fn cached(&self, raw: &str) -> Option<&RecordId> {
        let name = parse_person_name(raw)?;
        self.cache.get(&name.cache_key())
    }

    pub fn stats(&self) -> PersonStats {
        self.stats
    }
}
