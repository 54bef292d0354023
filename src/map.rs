//! Dictionary type for bencode values.
//!
//! [`Dictionary`] wraps an [`IndexMap`] from [`ByteString`] keys to values.
//! Iteration through [`Dictionary::iter`] follows insertion order, which
//! carries no meaning in bencode; the encoder always walks
//! [`Dictionary::sorted_iter`] instead, so two dictionaries with the same
//! entries encode identically however they were built.
//!
//! Equality ignores insertion order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_bencoding::{encode, Dictionary, Value};
//!
//! let mut dict = Dictionary::new();
//! dict.insert("spam", Value::from("eggs"));
//! dict.insert("cow", Value::from("moo"));
//!
//! assert_eq!(dict.len(), 2);
//! assert_eq!(dict.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
//! assert_eq!(encode(&Value::from(dict)), b"d3:cow3:moo4:spam4:eggse");
//! ```

use crate::{ByteString, Value};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// A mapping of byte-string keys to bencode values.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{Dictionary, Value};
///
/// let mut a = Dictionary::new();
/// a.insert("x", Value::from(1));
/// a.insert("y", Value::from(2));
///
/// let mut b = Dictionary::new();
/// b.insert("y", Value::from(2));
/// b.insert("x", Value::from(1));
///
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary(IndexMap<ByteString, Value>);

impl Dictionary {
    /// Creates an empty `Dictionary`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::Dictionary;
    ///
    /// let dict = Dictionary::new();
    /// assert!(dict.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Dictionary(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Dictionary(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Replacing keeps the key's original slot in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::{Dictionary, Value};
    ///
    /// let mut dict = Dictionary::new();
    /// assert!(dict.insert("key", Value::from(42)).is_none());
    /// assert_eq!(dict.insert("key", Value::from(43)), Some(Value::from(42)));
    /// ```
    pub fn insert<K: Into<ByteString>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, ByteString, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, ByteString, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, ByteString, Value> {
        self.0.iter()
    }

    /// Returns the entries in canonical order: keys ascending by raw bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::{Dictionary, Value};
    ///
    /// let mut dict = Dictionary::new();
    /// dict.insert("b", Value::from(2));
    /// dict.insert("a", Value::from(1));
    ///
    /// let keys: Vec<_> = dict.sorted_iter().map(|(k, _)| k.as_str().unwrap()).collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn sorted_iter(&self) -> impl Iterator<Item = (&ByteString, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter()
    }
}

impl From<BTreeMap<ByteString, Value>> for Dictionary {
    fn from(map: BTreeMap<ByteString, Value>) -> Self {
        Dictionary(map.into_iter().collect())
    }
}

impl From<HashMap<ByteString, Value>> for Dictionary {
    fn from(map: HashMap<ByteString, Value>) -> Self {
        Dictionary(map.into_iter().collect())
    }
}

impl From<Dictionary> for BTreeMap<ByteString, Value> {
    fn from(dict: Dictionary) -> Self {
        dict.0.into_iter().collect()
    }
}

impl IntoIterator for Dictionary {
    type Item = (ByteString, Value);
    type IntoIter = indexmap::map::IntoIter<ByteString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a ByteString, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, ByteString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<ByteString>> FromIterator<(K, Value)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Dictionary(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
