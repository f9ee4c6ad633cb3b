//! The persistence controller: load and save orchestration plus
//! failure-recovery policy.
//!
//! # Recovery policy (for beginners)
//!
//! Two very different kinds of failure can happen while loading:
//!
//! - **Document-level** failures — unreadable JSON, a version newer than
//!   this build understands, a fixer blowing up mid-migration. These
//!   compromise the snapshot as a whole, so the whole document is discarded
//!   and every setting keeps its default. All-defaults is always a safe,
//!   fully-specified state.
//!
//! - **Setting-level** failures — one value in an otherwise healthy,
//!   already-migrated document fails to parse. Only that setting is reset
//!   to its default; the rest of the registry loads normally.
//!
//! `load` never panics and only returns `Err` for a real storage read
//! failure; everything else is reported in the [`LoadReport`]. `save`
//! surfaces its errors, because there is no safe implicit fallback for a
//! failed write.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use prefstore_core::{
    write_version, Document, MigrateError, MigrationPlan, Registry, SettingId, ValueError,
};

use crate::store::{DocumentStore, StoreError};

/// Errors surfaced by [`Persister::save`].
#[derive(Debug, Error)]
pub enum SaveError {
    /// A setting's current value could not be serialized.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// The assembled document could not be encoded as JSON text.
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// Storage rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a stored document was discarded whole.
#[derive(Debug)]
pub enum RejectReason {
    /// The stored text is not a valid JSON object.
    Parse(serde_json::Error),
    /// The migration engine refused or failed to upgrade it.
    Migration(MigrateError),
}

/// What `load` did with the stored document.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No document exists yet; all settings keep their defaults.
    NoDocument,
    /// The document was already at the current schema version.
    UpToDate,
    /// The document was upgraded before values were extracted.
    Migrated { from: u32, to: u32 },
    /// The document was discarded whole; all settings keep their defaults.
    Rejected(RejectReason),
}

/// Diagnostics from one `load` call.
#[derive(Debug)]
pub struct LoadReport {
    pub outcome: LoadOutcome,
    /// Settings whose stored value failed to parse and were reset to their
    /// defaults. Empty on a fully clean load.
    pub value_errors: Vec<(SettingId, ValueError)>,
}

impl LoadReport {
    /// True when values were applied (or absent) without any failure.
    pub fn is_clean(&self) -> bool {
        !matches!(self.outcome, LoadOutcome::Rejected(_)) && self.value_errors.is_empty()
    }
}

/// Orchestrates load (read → migrate → populate registry) and save
/// (serialize registry → write) for one configuration document.
///
/// The storage location is injected at construction — a resolved path via
/// [`crate::store::FileStore`], or any other [`DocumentStore`] — rather than
/// looked up implicitly.
pub struct Persister {
    registry: Arc<Registry>,
    plan: MigrationPlan,
    store: Box<dyn DocumentStore>,
}

impl Persister {
    pub fn new(registry: Arc<Registry>, plan: MigrationPlan, store: Box<dyn DocumentStore>) -> Self {
        Self {
            registry,
            plan,
            store,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The schema version stamped on every saved document.
    pub fn schema_version(&self) -> u32 {
        self.plan.target_version()
    }

    /// Serializes every registered setting into a fresh document and writes
    /// it to storage.
    ///
    /// The document carries `_version` first, then one key per setting in
    /// registration order, so repeated saves of unchanged values produce
    /// byte-identical output.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] when a value cannot be serialized or storage
    /// rejects the write. A failed save leaves in-memory values untouched.
    pub fn save(&self) -> Result<(), SaveError> {
        let mut doc = Document::new();
        write_version(&mut doc, self.plan.target_version());
        for slot in self.registry.iter() {
            let value = slot.serialize_value()?;
            doc.insert(slot.id().to_string(), value);
        }

        let text = serde_json::to_string_pretty(&doc)?;
        self.store.write(&text)?;
        info!(
            "saved {} settings (schema version {}) to {}",
            self.registry.len(),
            self.plan.target_version(),
            self.store.describe()
        );
        Ok(())
    }

    /// Reads, migrates, and applies the stored document to the registry.
    ///
    /// See the module docs for the recovery policy. Settings absent from the
    /// document keep their current value (the default, at startup).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for a storage read failure that is not
    /// "missing file". Every document-level or per-setting problem is
    /// reported inside the `Ok` [`LoadReport`] instead, with the registry
    /// left in a safe state.
    pub fn load(&self) -> Result<LoadReport, StoreError> {
        let Some(text) = self.store.read()? else {
            debug!(
                "no stored document at {}; keeping defaults",
                self.store.describe()
            );
            return Ok(LoadReport {
                outcome: LoadOutcome::NoDocument,
                value_errors: Vec::new(),
            });
        };

        let mut doc: Document = match serde_json::from_str(&text) {
            Ok(doc) => doc,
            Err(err) => {
                error!(
                    "stored document at {} is not a valid JSON object: {err}; keeping defaults",
                    self.store.describe()
                );
                return Ok(LoadReport {
                    outcome: LoadOutcome::Rejected(RejectReason::Parse(err)),
                    value_errors: Vec::new(),
                });
            }
        };

        let migration = match self.plan.migrate(&mut doc) {
            Ok(report) => report,
            Err(err) => {
                // The document may be partially migrated; it is dropped here
                // and never applied to the registry.
                error!("migration failed: {err}; discarding document and keeping defaults");
                return Ok(LoadReport {
                    outcome: LoadOutcome::Rejected(RejectReason::Migration(err)),
                    value_errors: Vec::new(),
                });
            }
        };

        let mut value_errors = Vec::new();
        for slot in self.registry.iter() {
            let key = slot.id().to_string();
            let Some(value) = doc.get(&key) else {
                continue;
            };
            if let Err(err) = slot.deserialize_to_value(value) {
                warn!("setting '{key}' could not be restored: {err}; resetting to default");
                slot.reset_to_default();
                value_errors.push((slot.id().clone(), err));
            }
        }

        let outcome = if migration.was_noop() {
            LoadOutcome::UpToDate
        } else {
            info!(
                "migrated stored document from schema version {} to {}",
                migration.from, migration.to
            );
            LoadOutcome::Migrated {
                from: migration.from,
                to: migration.to,
            }
        };
        Ok(LoadReport {
            outcome,
            value_errors,
        })
    }
}
