//! Deduplicating entry collection.

use std::collections::HashSet;

use super::entry::{Entry, EntryKey};

/// Set of entries keyed by [`EntryKey`], iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    keys: HashSet<EntryKey>,
    entries: Vec<Entry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` unless an equal one is present. Returns whether it was added.
    pub fn insert(&mut self, entry: Entry) -> bool {
        let added = self.keys.insert(entry.key());
        if added {
            self.entries.push(entry);
        }
        added
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
