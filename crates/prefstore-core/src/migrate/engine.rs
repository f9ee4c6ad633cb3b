//! The migration plan: a version-gated table of fixers and the single
//! transition that drives a document up to the target schema version.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::document::{read_version, write_version, Document};

/// What a failed fixer reports upward. Fixers are free to use any error
/// type; the engine wraps it with the source version and fixer name.
pub type FixerFailure = Box<dyn std::error::Error + Send + Sync>;

/// A transform that upgrades a document by exactly one schema version step.
///
/// Fixers registered under the same source version run as an ordered list in
/// registration order; later fixers see the output of earlier ones.
pub trait Fixer: Send + Sync {
    /// Short name recorded in diagnostics when the fixer fails.
    fn name(&self) -> &str;

    /// Applies the transform in place.
    ///
    /// # Errors
    ///
    /// Any failure aborts the whole migration; the document is left
    /// partially migrated and must be discarded by the caller.
    fn apply(&self, doc: &mut Document) -> Result<(), FixerFailure>;
}

struct FnFixer<F> {
    name: String,
    func: F,
}

impl<F> Fixer for FnFixer<F>
where
    F: Fn(&mut Document) -> Result<(), FixerFailure> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, doc: &mut Document) -> Result<(), FixerFailure> {
        (self.func)(doc)
    }
}

/// Errors that abort a migration. Either way the caller must discard the
/// document and leave the registry at all-default values.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The document was written by a newer schema than this program knows;
    /// there is no safe downgrade path.
    #[error("document version {found} is newer than supported schema version {supported}")]
    VersionTooNew { found: u32, supported: u32 },

    /// A fixer in the chain failed.
    #[error("fixer '{name}' upgrading from version {version} failed: {source}")]
    Fixer {
        /// Source version whose chain was running.
        version: u32,
        /// Name of the fixer that failed.
        name: String,
        #[source]
        source: FixerFailure,
    },
}

/// Summary of one successful migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version the document declared (or 1 when it declared none).
    pub from: u32,
    /// Target schema version; the document now carries it.
    pub to: u32,
    /// Total fixer applications across all steps.
    pub fixers_applied: usize,
}

impl MigrationReport {
    /// True when the document was already at the target version.
    pub fn was_noop(&self) -> bool {
        self.from == self.to
    }
}

/// The version → fixer-list table plus the target schema version.
///
/// Built once at startup, read-only during migration.
pub struct MigrationPlan {
    target: u32,
    fixers: BTreeMap<u32, Vec<Box<dyn Fixer>>>,
}

impl MigrationPlan {
    /// Creates an empty plan targeting `target` as the current schema
    /// version.
    pub fn new(target: u32) -> Self {
        Self {
            target,
            fixers: BTreeMap::new(),
        }
    }

    /// The schema version documents are migrated up to.
    pub fn target_version(&self) -> u32 {
        self.target
    }

    /// Appends a fixer to the chain for `source_version`.
    ///
    /// Applying the chain for `v` upgrades a document from version `v` to
    /// `v + 1`.
    pub fn register(&mut self, source_version: u32, fixer: Box<dyn Fixer>) {
        self.fixers.entry(source_version).or_default().push(fixer);
    }

    /// Convenience: registers a closure as a fixer under `name`.
    pub fn register_fn<F>(&mut self, source_version: u32, name: impl Into<String>, func: F)
    where
        F: Fn(&mut Document) -> Result<(), FixerFailure> + Send + Sync + 'static,
    {
        self.register(
            source_version,
            Box::new(FnFixer {
                name: name.into(),
                func,
            }),
        );
    }

    /// Upgrades `doc` from its declared version to the target version, one
    /// integer step at a time.
    ///
    /// A missing or non-numeric `_version` is treated as version 1 (the
    /// oldest supported schema) with a logged warning. A version gap with no
    /// registered fixers is logged as a policy anomaly — usually a schema
    /// bump without a corresponding fixer — but does not block migration.
    ///
    /// On success the document is stamped with the target version.
    ///
    /// # Errors
    ///
    /// - [`MigrateError::VersionTooNew`] when the document declares a version
    ///   above the target; the document is unchanged.
    /// - [`MigrateError::Fixer`] when any fixer fails; the document is left
    ///   partially migrated and must not be used further.
    pub fn migrate(&self, doc: &mut Document) -> Result<MigrationReport, MigrateError> {
        let from = match read_version(doc) {
            Some(v) => v,
            None => {
                warn!("document declares no usable version; assuming oldest schema (1)");
                1
            }
        };

        if from > self.target {
            return Err(MigrateError::VersionTooNew {
                found: from,
                supported: self.target,
            });
        }

        let mut fixers_applied = 0;
        for version in from..self.target {
            let chain = self.fixers.get(&version).map(Vec::as_slice).unwrap_or(&[]);
            if chain.is_empty() {
                warn!("no fixers registered for schema version {version}; continuing");
                continue;
            }
            for fixer in chain {
                fixer.apply(doc).map_err(|source| MigrateError::Fixer {
                    version,
                    name: fixer.name().to_string(),
                    source,
                })?;
                fixers_applied += 1;
            }
            debug!(
                "migrated document from version {version} to {} ({} fixer(s))",
                version + 1,
                chain.len()
            );
        }

        if from != self.target {
            write_version(doc, self.target);
        }

        Ok(MigrationReport {
            from,
            to: self.target,
            fixers_applied,
        })
    }
}
