use crate::compat::{String, ToString, Vec};
use crate::encoding::{form_decode, form_encode_into};

/// One parameter namespace: an ordered multimap of string keys to string values.
///
/// Pairs are kept in insertion order, so both the per-key value order and the
/// overall serialization order are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parse from a query string (with or without leading `?`)
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        if query.is_empty() {
            return Self::new();
        }

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (form_decode(key), form_decode(value)),
                None => (form_decode(pair), String::new()),
            })
            .collect();

        Self { params }
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.params.push((key.to_string(), value.to_string()));
    }

    /// Delete every pair with the given key.
    pub fn delete(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a key, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    /// Set a key to a single value, replacing all existing values for that key.
    /// The surviving pair keeps the position of the first occurrence.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut found_first = false;
        self.params.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if found_first {
                return false;
            }
            found_first = true;
            *v = value.to_string();
            true
        });
        if !found_first {
            self.params.push((key.to_string(), value.to_string()));
        }
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    /// Serialize as `key=value&key=value`, without a leading `?`.
    pub fn serialize(&self) -> String {
        let mut result = String::new();
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                result.push('&');
            }
            form_encode_into(&mut result, key);
            result.push('=');
            form_encode_into(&mut result, value);
        }
        result
    }
}

impl core::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl From<&str> for QueryParams {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let params = iter
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Self { params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn test_parse_empty() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn test_parse_with_question_mark() {
        let params = QueryParams::parse("?key=value");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("key"), Some("value"));
    }

    #[test]
    fn test_parse_no_value() {
        let params = QueryParams::parse("key1&key2=value2");
        assert_eq!(params.get("key1"), Some(""));
        assert_eq!(params.get("key2"), Some("value2"));
    }

    #[test]
    fn test_parse_duplicate_keys() {
        let params = QueryParams::parse("key=value1&key=value2");
        assert_eq!(params.get("key"), Some("value1"));
        assert_eq!(params.get_all("key"), vec!["value1", "value2"]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let params = QueryParams::parse("Key=upper&key=lower");
        assert_eq!(params.get("Key"), Some("upper"));
        assert_eq!(params.get("key"), Some("lower"));
        assert_eq!(params.get("KEY"), None);
    }

    #[test]
    fn test_set_keeps_first_position() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.serialize(), "a=9&b=2");
    }

    #[test]
    fn test_set_new_key_appends() {
        let mut params = QueryParams::parse("a=1");
        params.set("b", "2");
        assert_eq!(params.serialize(), "a=1&b=2");
    }

    #[test]
    fn test_delete() {
        let mut params = QueryParams::parse("key1=value1&key2=value2&key1=value3");
        params.delete("key1");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("key1"), None);
        params.delete("missing");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_serialize_encoding() {
        let mut params = QueryParams::new();
        params.append("key", "value with spaces");
        params.append("math", "1+1=2");
        assert_eq!(params.serialize(), "key=value+with+spaces&math=1%2B1%3D2");
    }

    #[test]
    fn test_parse_decoding() {
        let params = QueryParams::parse("key=value%3Dspecial%26chars&s=a+b");
        assert_eq!(params.get("key"), Some("value=special&chars"));
        assert_eq!(params.get("s"), Some("a b"));
    }

    #[test]
    fn test_constructor_edge_cases() {
        let params = QueryParams::parse("&&&key=value&&&");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("key"), Some("value"));
    }

    #[test]
    fn test_equals_in_value() {
        let params = QueryParams::parse("key=value=with=equals");
        assert_eq!(params.get("key"), Some("value=with=equals"));
    }

    #[test]
    fn test_from_iter() {
        let params: QueryParams = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.to_string(), "a=1&b=2");
    }
}
