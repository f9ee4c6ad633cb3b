//! Document wire format: an ordered key/value tree plus the reserved
//! version key.
//!
//! A document is the ephemeral snapshot exchanged with storage. On disk it is
//! UTF-8 JSON text:
//!
//! ```json
//! {
//!   "_version": 3,
//!   "ui:theme": "dark",
//!   "editor:tab-width": 4
//! }
//! ```
//!
//! Every top-level key except `_version` is the string form of a registered
//! setting identity. Unknown keys are ignored on load and dropped on the next
//! save, since saving regenerates the document from the registry alone.
//!
//! `serde_json` is built with its `preserve_order` feature, so iterating a
//! [`Document`] yields keys in insertion order. That is what makes repeated
//! saves of the same registry byte-identical.

/// One value inside a document: a JSON primitive, array, or nested object.
pub type DocumentValue = serde_json::Value;

/// An ordered mapping from string key to [`DocumentValue`].
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Reserved top-level key holding the schema version that wrote the document.
///
/// Owned by the persistence layer; settings never read or write it.
pub const VERSION_KEY: &str = "_version";

/// Reads the document's declared schema version.
///
/// Returns `None` when the key is absent or not an unsigned integer; the
/// migration engine treats both the same way (oldest supported schema). A
/// declared version beyond `u32::MAX` saturates to `u32::MAX` instead: it is
/// numerically newer than any schema this build can have, and collapsing it
/// into "missing" would let the engine migrate a document it must reject.
pub fn read_version(doc: &Document) -> Option<u32> {
    doc.get(VERSION_KEY)?
        .as_u64()
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// Stamps the document with `version`, replacing any existing value.
pub fn write_version(doc: &mut Document, version: u32) {
    doc.insert(VERSION_KEY.to_string(), serde_json::Value::from(version));
}
