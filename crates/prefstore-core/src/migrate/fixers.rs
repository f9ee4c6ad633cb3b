//! Stock fixers for common schema deltas.

use thiserror::Error;

use super::engine::{Fixer, FixerFailure};
use crate::document::Document;

#[derive(Debug, Error)]
#[error("expected key '{0}' is absent")]
struct MissingKey(String);

struct RenameKey {
    old: String,
    new: String,
    name: String,
}

impl Fixer for RenameKey {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, doc: &mut Document) -> Result<(), FixerFailure> {
        // shift_remove keeps the remaining keys in their insertion order.
        let value = doc
            .shift_remove(&self.old)
            .ok_or_else(|| MissingKey(self.old.clone()))?;
        doc.insert(self.new.clone(), value);
        Ok(())
    }
}

/// Builds a fixer that moves the value at `old` to `new` and removes `old`.
///
/// The fixer **fails** when `old` is absent: a rename applied to a document
/// missing the old key means the chain ran out of order or against the wrong
/// version, and silently skipping it would mask that bug.
pub fn rename_key(old: impl Into<String>, new: impl Into<String>) -> Box<dyn Fixer> {
    let old = old.into();
    let new = new.into();
    let name = format!("rename '{old}' -> '{new}'");
    Box::new(RenameKey { old, new, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{read_version, write_version, Document};
    use crate::migrate::MigrationPlan;
    use serde_json::json;

    #[test]
    fn test_rename_moves_value_and_removes_old_key() {
        // {"_version":1, "mod:old":42} migrated to version 2 becomes
        // {"_version":2, "mod:new":42} with "mod:old" absent.
        let mut plan = MigrationPlan::new(2);
        plan.register(1, rename_key("mod:old", "mod:new"));
        let mut doc = Document::new();
        write_version(&mut doc, 1);
        doc.insert("mod:old".to_string(), json!(42));

        plan.migrate(&mut doc).expect("rename must succeed");

        assert_eq!(read_version(&doc), Some(2));
        assert_eq!(doc.get("mod:new"), Some(&json!(42)));
        assert!(doc.get("mod:old").is_none());
    }

    #[test]
    fn test_rename_fails_when_old_key_is_absent() {
        let mut plan = MigrationPlan::new(2);
        plan.register(1, rename_key("mod:old", "mod:new"));
        let mut doc = Document::new();
        write_version(&mut doc, 1);

        let result = plan.migrate(&mut doc);

        let err = result.expect_err("rename without the old key must fail");
        assert!(err.to_string().contains("mod:old"));
    }

    #[test]
    fn test_rename_applied_directly_reports_missing_key() {
        let fixer = rename_key("a:b", "a:c");
        let mut doc = Document::new();

        let failure = fixer.apply(&mut doc).expect_err("must fail");

        assert_eq!(failure.to_string(), "expected key 'a:b' is absent");
    }

    #[test]
    fn test_rename_preserves_other_keys() {
        let fixer = rename_key("mod:old", "mod:new");
        let mut doc = Document::new();
        doc.insert("keep:me".to_string(), json!("untouched"));
        doc.insert("mod:old".to_string(), json!([1, 2, 3]));

        fixer.apply(&mut doc).expect("rename must succeed");

        assert_eq!(doc.get("keep:me"), Some(&json!("untouched")));
        assert_eq!(doc.get("mod:new"), Some(&json!([1, 2, 3])));
    }
}
