//! Insertion-ordered registry of all settings for one configuration document.
//!
//! Membership is accumulated at startup and then effectively immutable: the
//! registry is shared as `Arc<Registry>` and read concurrently without any
//! further synchronisation (each setting's *value* has its own lock-free
//! cell; see [`super::setting`]).
//!
//! # Container choice
//!
//! A `Vec` holds the slots in registration order — that order drives the
//! serialize-all pass, keeping save output deterministic — while a
//! `HashMap<String, usize>` index gives O(1) lookup by identity string
//! during the deserialize-all pass.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::setting::ErasedSetting;

/// Errors produced when assembling a registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A setting with this identity string is already registered.
    ///
    /// This is a programmer error: two settings competing for one document
    /// key would make load/save ambiguous, so registration fails loudly
    /// instead of silently overwriting.
    #[error("duplicate setting identity '{0}'")]
    DuplicateId(String),
}

/// Ordered collection of type-erased settings keyed by identity.
#[derive(Default)]
pub struct Registry {
    slots: Vec<Arc<dyn ErasedSetting>>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a setting.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] when a setting with the same
    /// identity string is already present; the existing slot is untouched.
    pub fn register(&mut self, slot: Arc<dyn ErasedSetting>) -> Result<(), RegistryError> {
        let key = slot.id().to_string();
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateId(key));
        }
        self.index.insert(key, self.slots.len());
        self.slots.push(slot);
        Ok(())
    }

    /// Looks up a setting by its identity string (`"namespace:path"`).
    pub fn get(&self, key: &str) -> Option<&Arc<dyn ErasedSetting>> {
        self.index.get(key).map(|&i| &self.slots[i])
    }

    /// Iterates settings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ErasedSetting>> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
