//! Storage serialization for the per-domain preference map in chrome.storage.local

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain → dark mode enabled
///
/// Sparse: a domain that was never toggled has no entry and counts as
/// disabled. Stored as a plain JSON object under one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceMap {
    sites: BTreeMap<String, bool>,
}

impl PreferenceMap {
    pub fn new() -> Self {
        PreferenceMap {
            sites: BTreeMap::new(),
        }
    }

    pub fn is_enabled(&self, domain: &str) -> bool {
        self.sites.get(domain).copied().unwrap_or(false)
    }

    pub fn get(&self, domain: &str) -> Option<bool> {
        self.sites.get(domain).copied()
    }

    pub fn set(&mut self, domain: impl Into<String>, enabled: bool) {
        self.sites.insert(domain.into(), enabled);
    }

    /// Copy of the map with `domain` flipped, plus the new state.
    ///
    /// The entry is always written explicitly, so toggling an absent
    /// domain twice leaves it present and `false`.
    pub fn toggled(&self, domain: &str) -> (PreferenceMap, bool) {
        let enabled = !self.is_enabled(domain);
        let mut updated = self.clone();
        updated.set(domain, enabled);
        (updated, enabled)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl FromIterator<(String, bool)> for PreferenceMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        PreferenceMap {
            sites: iter.into_iter().collect(),
        }
    }
}
