//! Integration tests for the migration engine through the public API.
//!
//! These exercise realistic multi-step upgrade chains the way the
//! persistence controller drives them: parse a stored JSON snapshot,
//! migrate it, then pull typed values out through a registry.

use prefstore_core::{
    read_version, rename_key, Category, Document, MigrateError, MigrationPlan, Registry, Setting,
    SettingId,
};
use serde_json::json;

/// Parses inline JSON text into a document, as the controller does on load.
fn parse(text: &str) -> Document {
    serde_json::from_str(text).expect("test document must be valid JSON")
}

/// A three-version schema history:
/// - v1 → v2 renamed `ui:colour-scheme` to `ui:theme`
/// - v2 → v3 folded the old boolean `ui:dark-mode` into `ui:theme`
fn history() -> MigrationPlan {
    let mut plan = MigrationPlan::new(3);
    plan.register(1, rename_key("ui:colour-scheme", "ui:theme"));
    plan.register_fn(2, "fold dark-mode into theme", |doc| {
        if let Some(dark) = doc.shift_remove("ui:dark-mode") {
            if dark == json!(true) {
                doc.insert("ui:theme".to_string(), json!("dark"));
            }
        }
        Ok(())
    });
    plan
}

#[test]
fn test_v1_document_upgrades_through_both_steps() {
    let mut doc = parse(r#"{"_version": 1, "ui:colour-scheme": "light", "ui:dark-mode": true}"#);

    let report = history().migrate(&mut doc).expect("chain must succeed");

    assert_eq!(report.from, 1);
    assert_eq!(report.to, 3);
    assert_eq!(read_version(&doc), Some(3));
    // The rename ran first, then the fold overwrote the renamed value.
    assert_eq!(doc.get("ui:theme"), Some(&json!("dark")));
    assert!(doc.get("ui:colour-scheme").is_none());
    assert!(doc.get("ui:dark-mode").is_none());
}

#[test]
fn test_v2_document_only_runs_the_second_step() {
    let mut doc = parse(r#"{"_version": 2, "ui:theme": "light", "ui:dark-mode": false}"#);

    let report = history().migrate(&mut doc).expect("chain must succeed");

    assert_eq!(report.from, 2);
    assert_eq!(doc.get("ui:theme"), Some(&json!("light")));
    assert!(doc.get("ui:dark-mode").is_none());
}

#[test]
fn test_future_document_is_rejected_without_changes() {
    let mut doc = parse(r#"{"_version": 9, "ui:theme": "dark"}"#);
    let before = doc.clone();

    let result = history().migrate(&mut doc);

    assert!(matches!(result, Err(MigrateError::VersionTooNew { found: 9, supported: 3 })));
    assert_eq!(doc, before);
}

#[test]
fn test_migrated_document_feeds_a_typed_registry() {
    let theme = Setting::new(
        SettingId::new("ui", "theme"),
        Category::new("ui", "appearance"),
        "system".to_string(),
    );
    let mut registry = Registry::new();
    registry.register(theme.clone()).expect("register");

    let mut doc = parse(r#"{"_version": 1, "ui:colour-scheme": "light"}"#);
    history().migrate(&mut doc).expect("chain must succeed");

    for slot in registry.iter() {
        if let Some(value) = doc.get(&slot.id().to_string()) {
            slot.deserialize_to_value(value).expect("migrated value must parse");
        }
    }

    assert_eq!(theme.get(), "light");
}
