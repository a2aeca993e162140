//! Ordered header set with first-write-wins merging.
//!
//! Names compare ASCII case-insensitively and keep the spelling of the first
//! insertion. `merge_missing` only adds names that are not present yet, so the
//! set that was written first always wins a collision; `set` is the only way
//! to overwrite.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Insert unless `name` is already present. Returns whether it was added.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains_key(&name) {
            return false;
        }
        self.entries.push((name, value.into()));
        true
    }

    /// Insert or overwrite. An existing entry keeps its position and spelling.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = value.into(),
            None => self.entries.push((name, value.into())),
        }
    }

    /// Add every entry of `other` whose name is not present yet.
    pub fn merge_missing(&mut self, other: &Headers) {
        for (k, v) in &other.entries {
            self.insert_if_absent(k.clone(), v.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert_if_absent(k, v);
        }
        headers
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct HeadersVisitor;

impl<'de> Visitor<'de> for HeadersVisitor {
    type Value = Headers;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of header names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Headers, A::Error> {
        let mut headers = Headers::new();
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            headers.insert_if_absent(k, v);
        }
        Ok(headers)
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HeadersVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_if_absent_keeps_first_value() {
        let mut h = Headers::new();
        assert!(h.insert_if_absent("X-Client", "first"));
        assert!(!h.insert_if_absent("x-client", "second"));
        assert_eq!(h.get("X-CLIENT"), Some("first"));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut h = Headers::from([("Accept", "text/html"), ("X-Other", "1")]);
        h.set("accept", "application/json");
        let pairs: Vec<_> = h.iter().collect();
        assert_eq!(pairs, vec![("Accept", "application/json"), ("X-Other", "1")]);
    }

    #[test]
    fn merge_missing_is_additive() {
        let mut h = Headers::from([("Sample-Header", "Test string")]);
        h.merge_missing(&Headers::from([
            ("Sample-Header", "ignored"),
            ("Another-Sample", "Test two"),
        ]));
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("Sample-Header"), Some("Test string"));
        assert_eq!(h.get("Another-Sample"), Some("Test two"));
    }

    #[test]
    fn merge_treats_names_differing_only_in_case_as_one() {
        let mut h = Headers::from([("Sample-Header", "Test string")]);
        h.merge_missing(&Headers::from([("sample-header", "lower"), ("SAMPLE-HEADER", "upper")]));
        assert_eq!(h.len(), 1);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![("Sample-Header", "Test string")]);
    }

    #[test]
    fn deserializes_from_json_object_in_order() {
        let h: Headers = serde_json::from_str(r#"{"B-Header":"2","A-Header":"1"}"#).unwrap();
        let names: Vec<_> = h.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["B-Header", "A-Header"]);
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"B-Header":"2","A-Header":"1"}"#);
    }
}
