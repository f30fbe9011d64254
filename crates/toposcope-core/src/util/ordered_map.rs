//! Insertion-ordered map with lookup by key or by position

use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::{GraphError, GraphResult};

/// An [`IndexMap`] with bounds-checked positional access.
///
/// Re-inserting an existing key updates its value in place without moving it.
/// Removal keeps the relative order of the remaining entries.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        OrderedMap {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    fn out_of_bounds(&self, index: usize) -> GraphError {
        GraphError::IndexOutOfBounds {
            index,
            len: self.entries.len(),
        }
    }

    /// Entry at insertion position `index`.
    pub fn get_index(&self, index: usize) -> GraphResult<(&K, &V)> {
        self.entries
            .get_index(index)
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Key at insertion position `index`.
    pub fn key_at(&self, index: usize) -> GraphResult<&K> {
        self.get_index(index).map(|(key, _)| key)
    }

    /// Insert or update. Returns the previous value for an existing key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Overwrite the value stored at insertion position `index`.
    pub fn set_index(&mut self, index: usize, value: V) -> GraphResult<()> {
        let error = self.out_of_bounds(index);
        let (_, slot) = self.entries.get_index_mut(index).ok_or(error)?;
        *slot = value;
        Ok(())
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter()
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OrderedMap {
            entries: iter.into_iter().collect(),
        }
    }
}
