//! Per-compilation property storage with first-wins writes.
//!
//! A [`PropertyStore`] lives exactly as long as one page compilation. Every
//! key can be written once; later writes are silently dropped. This is what
//! lets an explicit override and automatic derivation both target the same
//! key without coordinating: whichever runs first decides the value.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Entry};

/// Property name holding the page description.
pub const DESCRIPTION_KEY: &str = "description";

/// Outcome of a [`PropertyStore::set_if_absent`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SetOutcome {
    /// The key was unset and now holds the value.
    Stored,
    /// The key already held a value; the write was dropped.
    AlreadySet,
}

impl SetOutcome {
    /// Check if the write took effect.
    pub fn is_stored(self) -> bool {
        self == SetOutcome::Stored
    }
}

/// Mapping from property name to value with first-wins semantics.
///
/// There is no insert, overwrite or remove: once a key is set it stays set
/// for the lifetime of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyStore {
    values: BTreeMap<String, String>,
}

impl PropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value, or `None` if it was never set.
    ///
    /// An empty string is a legitimate value and is returned as `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check if a property has been set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Store `value` under `key` unless the key already holds a value.
    pub fn set_if_absent(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> SetOutcome {
        match self.values.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                SetOutcome::Stored
            }
            Entry::Occupied(slot) => {
                log::debug!("Property '{}' already set, ignoring write", slot.key());
                SetOutcome::AlreadySet
            }
        }
    }

    /// Iterate over all set properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of set properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no property has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// State carried through one page compilation.
///
/// The host creates one per compilation, passes it by `&mut` to whatever
/// writes properties (override directives, automatic derivation) and reads
/// it afterwards when emitting metadata. Concurrent compilations each need
/// their own context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    properties: PropertyStore,
    #[serde(default)]
    interface_message: bool,
}

impl PageContext {
    /// Create a context for an ordinary page compilation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for an interface message compilation.
    pub fn interface_message() -> Self {
        Self {
            interface_message: true,
            ..Self::default()
        }
    }

    /// Whether this compilation renders UI text rather than page content.
    pub fn is_interface_message(&self) -> bool {
        self.interface_message
    }

    /// Page properties set so far during this compilation.
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Set an arbitrary property unless it is already stored.
    pub fn set_property_if_absent(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> SetOutcome {
        self.properties.set_if_absent(key, value)
    }

    /// The stored description, if any.
    pub fn description(&self) -> Option<&str> {
        self.properties.get(DESCRIPTION_KEY)
    }

    /// Set the description unless one is already stored.
    pub fn set_description_if_absent(&mut self, value: impl Into<String>) -> SetOutcome {
        self.properties.set_if_absent(DESCRIPTION_KEY, value)
    }
}
