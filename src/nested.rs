//! Bracket-key parameter trees.
//!
//! Flat query strings such as `user[name]=ann&user[tags][first]=x` map to a
//! tree of [`ParamValue`]s and back:
//!
//! ```
//! use hashq::nested::{self, ParamValue};
//!
//! let tree = nested::parse("foo[bar]=baz&foo[qux]=quux");
//! assert_eq!(tree.get_path(&["foo", "bar"]).and_then(ParamValue::as_leaf), Some("baz"));
//! assert_eq!(nested::stringify(&tree), "foo[bar]=baz&foo[qux]=quux");
//! ```

use crate::compat::{String, ToString, Vec};
use crate::encoding::{BRACKET_KEY_SET, COMPONENT_SET, percent_encode_with_set};
use crate::query_params::QueryParams;

/// A node in a parameter tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Leaf(String),
    Node(ParamMap),
}

impl ParamValue {
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&ParamMap> {
        match self {
            Self::Node(map) => Some(map),
            Self::Leaf(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        Self::Node(map)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

/// Ordered mapping from key to [`ParamValue`].
///
/// Keys keep their first-insertion position; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ParamValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Follow a key path through nested nodes
    pub fn get_path(&self, path: &[&str]) -> Option<&ParamValue> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get(first)?;
        for key in rest {
            current = current.as_node()?.get(key)?;
        }
        Some(current)
    }

    /// Insert or replace, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walk `segments`, creating nodes as needed, and store a leaf at the end.
    /// A leaf found where a node is needed is replaced by a node.
    fn insert_path(&mut self, segments: &[&str], value: &str) {
        match segments {
            [] => {}
            [last] => {
                self.insert(*last, ParamValue::leaf(value));
            }
            [first, rest @ ..] => {
                let pos = match self.entries.iter().position(|(k, _)| k == first) {
                    Some(pos) => pos,
                    None => {
                        self.entries
                            .push(((*first).to_string(), ParamValue::Node(ParamMap::new())));
                        self.entries.len() - 1
                    }
                };
                let slot = &mut self.entries[pos].1;
                let mut child = match core::mem::replace(slot, ParamValue::Node(ParamMap::new())) {
                    ParamValue::Node(map) => map,
                    ParamValue::Leaf(_) => ParamMap::new(),
                };
                child.insert_path(rest, value);
                *slot = ParamValue::Node(child);
            }
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Split a bracket key into its non-empty segments: `a[b][]c` -> `[a, b, c]`
fn key_segments(key: &str) -> impl Iterator<Item = &str> {
    key.split(['[', ']']).filter(|segment| !segment.is_empty())
}

/// Parse a flat bracket-key query string into a parameter tree.
///
/// Pairs are form-decoded first. Empty bracket segments are dropped, so
/// `a[]=1` sets `a`. When a leaf and a node meet at the same path the
/// later pair wins.
pub fn parse(query: &str) -> ParamMap {
    let mut root = ParamMap::new();

    for (key, value) in QueryParams::parse(query).iter() {
        let segments: Vec<&str> = key_segments(key).collect();
        root.insert_path(&segments, value);
    }

    root
}

/// Serialize a parameter tree into a flat bracket-key query string.
pub fn stringify(tree: &ParamMap) -> String {
    stringify_prefixed(tree, None)
}

/// Serialize a parameter tree with every key nested under `prefix`.
pub fn stringify_prefixed(tree: &ParamMap, prefix: Option<&str>) -> String {
    let mut parts = Vec::new();
    collect_pairs(tree, prefix, &mut parts);
    parts.join("&")
}

fn collect_pairs(tree: &ParamMap, prefix: Option<&str>, parts: &mut Vec<String>) {
    for (key, value) in tree.iter() {
        let full_key = match prefix {
            Some(prefix) => {
                let mut full = String::with_capacity(prefix.len() + key.len() + 2);
                full.push_str(prefix);
                full.push('[');
                full.push_str(key);
                full.push(']');
                full
            }
            None => key.to_string(),
        };
        match value {
            ParamValue::Node(children) => collect_pairs(children, Some(full_key.as_str()), parts),
            ParamValue::Leaf(leaf) => {
                let mut pair = percent_encode_with_set(&full_key, BRACKET_KEY_SET);
                pair.push('=');
                pair.push_str(&percent_encode_with_set(leaf, COMPONENT_SET));
                parts.push(pair);
            }
        }
    }
}
