//! Namespaced setting identities and category labels.
//!
//! A [`SettingId`] is globally unique within one registry and doubles as the
//! document key (`"namespace:path"`) and as the lookup key for any
//! translation/labeling metadata an editor layer may keep. A [`Category`]
//! has the same namespaced shape but is only a grouping label; many settings
//! may share one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when parsing an identity from its string form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdParseError {
    /// The string contains no `:` separator.
    #[error("missing ':' separator in identity '{0}'")]
    MissingSeparator(String),

    /// The namespace or path component is empty.
    #[error("empty {part} in identity '{id}'")]
    EmptyComponent { part: &'static str, id: String },
}

/// Unique identity of a setting: a namespace plus a path within it.
///
/// The display form `"namespace:path"` is exactly the key the setting
/// occupies in a persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingId {
    namespace: String,
    path: String,
}

impl SettingId {
    /// Creates an identity from its two components.
    ///
    /// Components are taken as given; parsing from the colon-joined string
    /// form goes through [`FromStr`], which does validate.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for SettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for SettingId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, path) = s
            .split_once(':')
            .ok_or_else(|| IdParseError::MissingSeparator(s.to_string()))?;
        if namespace.is_empty() {
            return Err(IdParseError::EmptyComponent {
                part: "namespace",
                id: s.to_string(),
            });
        }
        if path.is_empty() {
            return Err(IdParseError::EmptyComponent {
                part: "path",
                id: s.to_string(),
            });
        }
        Ok(Self::new(namespace, path))
    }
}

/// Namespaced grouping label for settings.
///
/// Independent of identity uniqueness; an editor uses it to cluster widgets
/// into sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    namespace: String,
    label: String,
}

impl Category {
    pub fn new(namespace: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            label: label.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_form_is_namespace_colon_path() {
        let id = SettingId::new("editor", "tab-width");

        assert_eq!(id.to_string(), "editor:tab-width");
    }

    #[test]
    fn test_from_str_round_trips_display_form() {
        let id = SettingId::new("ui", "theme");

        let parsed: SettingId = id.to_string().parse().expect("parse must succeed");

        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_str_without_separator_is_rejected() {
        let result: Result<SettingId, _> = "no-colon-here".parse();

        assert!(matches!(result, Err(IdParseError::MissingSeparator(_))));
    }

    #[test]
    fn test_from_str_with_empty_namespace_is_rejected() {
        let result: Result<SettingId, _> = ":path".parse();

        assert!(matches!(
            result,
            Err(IdParseError::EmptyComponent { part: "namespace", .. })
        ));
    }

    #[test]
    fn test_from_str_with_empty_path_is_rejected() {
        let result: Result<SettingId, _> = "ns:".parse();

        assert!(matches!(
            result,
            Err(IdParseError::EmptyComponent { part: "path", .. })
        ));
    }

    #[test]
    fn test_path_may_itself_contain_colons() {
        // Only the first ':' separates namespace from path.
        let parsed: SettingId = "mod:group:item".parse().expect("parse must succeed");

        assert_eq!(parsed.namespace(), "mod");
        assert_eq!(parsed.path(), "group:item");
    }
}
