//! # prefstore-core
//!
//! Typed setting registry and versioned document migration engine.
//!
//! This crate is the pure-domain half of prefstore. It has zero dependencies
//! on the file system, OS directories, or any GUI toolkit; the `prefstore-fs`
//! crate layers storage on top of it.
//!
//! # Architecture overview (for beginners)
//!
//! A *setting* is a single named, typed configuration value with a default
//! (e.g. `ui:theme`, default `"dark"`). All settings for one configuration
//! document live in a *registry*. When the application saves, every setting
//! is serialized into a JSON-like *document*; when it loads, values are
//! parsed back out of a document read from disk.
//!
//! The interesting part is what happens when the schema changes between the
//! version that wrote the document and the version reading it. This crate
//! defines:
//!
//! - **`document`** – The document wire format: an ordered key/value tree
//!   with one reserved `_version` key recording the schema that wrote it.
//!
//! - **`domain`** – Settings, their namespaced identities, and the
//!   insertion-ordered registry. Each `Setting<T>` keeps its current value
//!   in a lock-free cell so a UI thread and a persistence thread can
//!   read/write it concurrently.
//!
//! - **`migrate`** – The migration engine: a version-gated chain of *fixers*
//!   that upgrades a document one schema version at a time until it matches
//!   the version the registry expects. Documents newer than the running
//!   schema are rejected outright.
//!
//! # Logging
//!
//! The crate emits diagnostics through [`tracing`] and never installs a
//! subscriber itself. Binaries typically initialise one with
//! `tracing_subscriber::fmt().with_env_filter(...)`.

pub mod document;
pub mod domain;
pub mod migrate;

// Re-export the most-used types at the crate root so callers can write
// `prefstore_core::Setting` instead of `prefstore_core::domain::setting::Setting`.
pub use document::{read_version, write_version, Document, DocumentValue, VERSION_KEY};
pub use domain::id::{Category, IdParseError, SettingId};
pub use domain::registry::{Registry, RegistryError};
pub use domain::setting::{ErasedSetting, Setting, SettingValue, TweakHook, ValueError};
pub use migrate::{
    rename_key, Fixer, FixerFailure, MigrateError, MigrationPlan, MigrationReport,
};
