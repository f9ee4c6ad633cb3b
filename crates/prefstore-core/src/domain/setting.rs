//! Typed settings and their type-erased registry interface.
//!
//! # Thread safety
//!
//! A setting's current value can be read and written from several threads at
//! once: the UI thread writes when the user flips a toggle, the persistence
//! thread reads during a serialization pass. The value therefore lives in an
//! [`ArcSwap`] cell rather than a plain field: `get` and `set` are lock-free
//! and sequentially consistent with respect to each other, so a completed
//! `set` is visible to every subsequent `get` from any thread.
//!
//! There is deliberately **no** atomicity across different settings. A save
//! that races with writes to several settings may capture a mix of old and
//! new values; the persisted document is a best-effort point-in-time
//! snapshot, not a transaction.
//!
//! # Type erasure (for beginners)
//!
//! The registry must hold `Setting<bool>`, `Setting<u32>`, and
//! `Setting<MyStruct>` in one ordered collection. Rust collections are
//! homogeneous, so each `Setting<T>` also implements the non-generic
//! [`ErasedSetting`] trait, and the registry only ever stores
//! `Arc<dyn ErasedSetting>`. Full type safety is recovered at the call site
//! that created the concrete setting and kept its typed `Arc<Setting<T>>`.

use std::any::Any;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::id::{Category, SettingId};
use crate::document::DocumentValue;

/// Errors for converting a single setting's value to or from a document.
#[derive(Debug, Error)]
pub enum ValueError {
    /// The stored document value does not have the shape this setting expects.
    #[error("setting '{id}' rejected stored value: {source}")]
    Malformed {
        id: SettingId,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory value could not be serialized into a document value.
    #[error("setting '{id}' could not be serialized: {source}")]
    Unserializable {
        id: SettingId,
        #[source]
        source: serde_json::Error,
    },
}

/// Bound for the value type a setting can hold.
///
/// Blanket-implemented; any `serde`-capable, cloneable, comparable,
/// thread-safe type qualifies.
pub trait SettingValue:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static
{
}

impl<T> SettingValue for T where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static
{
}

/// Opaque widget-construction hook stored on a setting.
///
/// The persistence core never invokes it. The editor layer downcasts the
/// `&mut dyn Any` argument to its own widget-builder type when constructing
/// the widget for this setting.
pub type TweakHook = Arc<dyn Fn(&mut dyn Any) + Send + Sync>;

/// A single named, typed, versionable configuration value.
///
/// Created once at startup and shared for the process lifetime as
/// `Arc<Setting<T>>`; the typed handle stays with the code that owns the
/// value, while a clone of the `Arc` goes into the [`Registry`] as an
/// erased slot.
///
/// [`Registry`]: super::registry::Registry
///
/// # Examples
///
/// ```rust
/// use prefstore_core::{Category, Setting, SettingId};
///
/// let tab_width = Setting::new(
///     SettingId::new("editor", "tab-width"),
///     Category::new("editor", "appearance"),
///     4u32,
/// );
/// assert_eq!(tab_width.get(), 4);
/// tab_width.set(8);
/// assert_eq!(tab_width.get(), 8);
/// ```
pub struct Setting<T: SettingValue> {
    id: SettingId,
    category: Category,
    /// Immutable for the setting's lifetime; the fallback for corrupt or
    /// missing entries.
    default: T,
    current: ArcSwap<T>,
    tweak: Option<TweakHook>,
}

impl<T: SettingValue> Setting<T> {
    /// Creates a setting whose current value starts at `default`.
    pub fn new(id: SettingId, category: Category, default: T) -> Arc<Self> {
        Arc::new(Self {
            current: ArcSwap::from_pointee(default.clone()),
            default,
            id,
            category,
            tweak: None,
        })
    }

    /// Like [`Setting::new`], with an editor tweak hook attached.
    pub fn with_tweak(
        id: SettingId,
        category: Category,
        default: T,
        tweak: TweakHook,
    ) -> Arc<Self> {
        Arc::new(Self {
            current: ArcSwap::from_pointee(default.clone()),
            default,
            id,
            category,
            tweak: Some(tweak),
        })
    }

    pub fn id(&self) -> &SettingId {
        &self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// The value a corrupt or missing document entry falls back to.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Lock-free read of the current value. Never fails.
    pub fn get(&self) -> T {
        self.current.load().as_ref().clone()
    }

    /// Lock-free write. Never fails, and never persists to storage on its
    /// own; persistence is explicit through the controller.
    pub fn set(&self, value: T) {
        self.current.store(Arc::new(value));
    }

    /// Whether the current value still equals the default.
    pub fn is_default(&self) -> bool {
        *self.current.load().as_ref() == self.default
    }

    /// Serializes the current value into a document value.
    pub fn serialize(&self) -> Result<DocumentValue, ValueError> {
        serde_json::to_value(self.get()).map_err(|source| ValueError::Unserializable {
            id: self.id.clone(),
            source,
        })
    }

    /// Parses a document value into a `T` without touching the current value.
    ///
    /// The caller decides whether to apply the result.
    pub fn deserialize(&self, value: &DocumentValue) -> Result<T, ValueError> {
        serde_json::from_value(value.clone()).map_err(|source| ValueError::Malformed {
            id: self.id.clone(),
            source,
        })
    }

    /// Parses a document value and, on success, applies it with a single
    /// atomic store. A reader never observes a partially-applied value, and
    /// a parse failure leaves the current value untouched.
    pub fn deserialize_to_value(&self, value: &DocumentValue) -> Result<(), ValueError> {
        let parsed = self.deserialize(value)?;
        self.set(parsed);
        Ok(())
    }

    /// Sets the current value back to the default.
    pub fn reset_to_default(&self) {
        self.set(self.default.clone());
    }
}

/// Non-generic capability interface every `Setting<T>` provides.
///
/// This is all the registry, the persistence controller, and the editor
/// layer ever see. The methods mirror the typed API; `default_value` and
/// `current_value` hand out document values because the concrete `T` is
/// hidden.
pub trait ErasedSetting: Send + Sync {
    fn id(&self) -> &SettingId;
    fn category(&self) -> &Category;
    fn serialize_value(&self) -> Result<DocumentValue, ValueError>;
    fn deserialize_to_value(&self, value: &DocumentValue) -> Result<(), ValueError>;
    fn reset_to_default(&self);
    fn is_default(&self) -> bool;
    fn default_value(&self) -> Result<DocumentValue, ValueError>;
    fn current_value(&self) -> Result<DocumentValue, ValueError>;
    fn tweak(&self) -> Option<&TweakHook>;
}

impl<T: SettingValue> ErasedSetting for Setting<T> {
    fn id(&self) -> &SettingId {
        Setting::id(self)
    }

    fn category(&self) -> &Category {
        Setting::category(self)
    }

    fn serialize_value(&self) -> Result<DocumentValue, ValueError> {
        self.serialize()
    }

    fn deserialize_to_value(&self, value: &DocumentValue) -> Result<(), ValueError> {
        Setting::deserialize_to_value(self, value)
    }

    fn reset_to_default(&self) {
        Setting::reset_to_default(self)
    }

    fn is_default(&self) -> bool {
        Setting::is_default(self)
    }

    fn default_value(&self) -> Result<DocumentValue, ValueError> {
        serde_json::to_value(self.default.clone()).map_err(|source| ValueError::Unserializable {
            id: self.id.clone(),
            source,
        })
    }

    fn current_value(&self) -> Result<DocumentValue, ValueError> {
        self.serialize()
    }

    fn tweak(&self) -> Option<&TweakHook> {
        self.tweak.as_ref()
    }
}
