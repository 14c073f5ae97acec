// SPDX-License-Identifier: MPL-2.0
//! Session cache of fetched metadata, keyed by result path.
//!
//! Entries are written once and never evicted or replaced: a view session is
//! short and the set of results is fixed.

use super::Metadata;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    entries: HashMap<String, Metadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Metadata> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Stores `metadata` for `path` unless an entry already exists.
    ///
    /// Returns `true` if the entry was written.
    pub fn insert_once(&mut self, path: &str, metadata: Metadata) -> bool {
        if self.entries.contains_key(path) {
            return false;
        }
        self.entries.insert(path.to_string(), metadata);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
