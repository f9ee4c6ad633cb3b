//! # prefstore-fs
//!
//! Filesystem persistence for the prefstore setting registry.
//!
//! This crate is the storage half of prefstore: it resolves a
//! platform-appropriate config directory, reads and writes the JSON
//! document through a small [`store::DocumentStore`] boundary, and
//! orchestrates load (read → migrate → populate registry) and save
//! (serialize registry → write) in [`controller::Persister`].
//!
//! Failure-recovery policy lives here too: a document the migration engine
//! rejects is discarded whole and the registry keeps its defaults, while a
//! single corrupt setting value only resets that one setting.
//!
//! Logging goes through `tracing`; initialise a subscriber in your binary,
//! e.g.:
//!
//! ```rust,no_run
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(
//!         EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
//!     )
//!     .init();
//! ```

pub mod controller;
pub mod memory;
pub mod resolver;
pub mod store;

pub use controller::{LoadOutcome, LoadReport, Persister, RejectReason, SaveError};
pub use memory::MemoryStore;
pub use resolver::{config_dir, document_path, ResolveError};
pub use store::{DocumentStore, FileStore, StoreError};
