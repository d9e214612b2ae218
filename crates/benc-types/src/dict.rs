use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::value::Value;

/// Dictionary payload: byte-string keys mapped to values.
///
/// Keys are raw bytes and are unique. Iteration is always in byte-wise
/// ascending key order, which is exactly the order the wire form requires,
/// independent of the order entries were inserted in. `Vec<u8>`'s `Ord` is
/// lexicographic over unsigned bytes, so `b"Z" < b"a" < b"ab"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dict(BTreeMap<Vec<u8>, Value>);

impl Dict {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.0.get(key.as_ref())
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut Value> {
        self.0.get_mut(key.as_ref())
    }

    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<Value> {
        self.0.remove(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.0.contains_key(key.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Vec<u8>, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Vec<u8>, Value> {
        self.0.keys()
    }

    /// Largest key currently present.
    #[must_use]
    pub fn last_key(&self) -> Option<&[u8]> {
        self.0.keys().next_back().map(Vec::as_slice)
    }
}

impl<K: Into<Vec<u8>>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<Vec<u8>>, V: Into<Value>> Extend<(K, V)> for Dict {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Dict {
    type Item = (Vec<u8>, Value);
    type IntoIter = btree_map::IntoIter<Vec<u8>, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a Vec<u8>, &'a Value);
    type IntoIter = btree_map::Iter<'a, Vec<u8>, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
