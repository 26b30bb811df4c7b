//! Query parameter normalization.
//!
//! Web frameworks hand over a query either as one value per key or as a list
//! when the key was repeated. [`RawQuery`] models that boundary explicitly and
//! [`normalize`] turns it into the uniform [`CanonicalParams`] map that every
//! other module works with.

use indexmap::IndexMap;
use serde::Serialize;
use url::form_urlencoded;

/// Canonical multi-value parameter map.
///
/// Key order is the order of first appearance and value order within a key
/// is preserved; both matter when the map is serialized again.
pub type CanonicalParams = IndexMap<String, Vec<String>>;

/// A single query key's value as delivered by the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// The key appeared once.
    Single(String),
    /// The key appeared more than once, or was supplied as a list.
    Multiple(Vec<String>),
}

impl QueryValue {
    /// Append another occurrence of the same key.
    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(first) => {
                let first = std::mem::take(first);
                *self = QueryValue::Multiple(vec![first, value]);
            }
            QueryValue::Multiple(values) => values.push(value),
        }
    }

    /// Consume the value into an ordered list of strings.
    pub fn into_values(self) -> Vec<String> {
        match self {
            QueryValue::Single(value) => vec![value],
            QueryValue::Multiple(values) => values,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Multiple(values)
    }
}

/// Untyped query object, keyed in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    entries: IndexMap<String, QueryValue>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// A key seen once becomes [`QueryValue::Single`]; repeated keys collapse
    /// into one [`QueryValue::Multiple`] at the position of their first
    /// occurrence.
    pub fn from_query_string(query: &str) -> Self {
        let mut raw = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            raw.append(key.into_owned(), value.into_owned());
        }
        raw
    }

    /// Record one occurrence of `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.entries.insert(key, QueryValue::Single(value));
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawQuery
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    /// A repeated key keeps its first position and takes the last value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { entries }
    }
}

/// Convert a framework query into the canonical multi-value form.
///
/// Singles are wrapped into one-element lists, lists pass through unchanged,
/// and key order is kept. No validation happens here.
pub fn normalize(raw: RawQuery) -> CanonicalParams {
    raw.entries
        .into_iter()
        .map(|(key, value)| (key, value.into_values()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_single_values() {
        let raw: RawQuery = [("location", "1,2"), ("type", "restaurant")]
            .into_iter()
            .collect();

        let params = normalize(raw);

        assert_eq!(params["location"], vec!["1,2".to_string()]);
        assert_eq!(params["type"], vec!["restaurant".to_string()]);
    }

    #[test]
    fn test_normalize_passes_lists_through() {
        let tags = vec!["finance".to_string(), "tech".to_string()];
        let raw: RawQuery = [("tags", QueryValue::Multiple(tags.clone()))]
            .into_iter()
            .collect();

        let params = normalize(raw);

        assert_eq!(params["tags"], tags);
    }

    #[test]
    fn test_normalize_keeps_key_order() {
        let raw: RawQuery = [("radius", "10"), ("location", "1,2"), ("keyword", "pho")]
            .into_iter()
            .collect();

        let keys: Vec<String> = normalize(raw).into_keys().collect();

        assert_eq!(keys, vec!["radius", "location", "keyword"]);
    }

    #[test]
    fn test_normalize_empty_query() {
        assert!(normalize(RawQuery::new()).is_empty());
    }

    #[test]
    fn test_from_query_string_groups_repeated_keys() {
        let raw = RawQuery::from_query_string("tags=finance&type=restaurant&tags=tech");

        let expected: RawQuery = [
            (
                "tags",
                QueryValue::Multiple(vec!["finance".to_string(), "tech".to_string()]),
            ),
            ("type", QueryValue::from("restaurant")),
        ]
        .into_iter()
        .collect();
        assert_eq!(raw, expected);
    }

    #[test]
    fn test_from_query_string_decodes_values() {
        let raw = RawQuery::from_query_string("location=-33.8%2C151.1&keyword=thai+food");

        let params = normalize(raw);

        assert_eq!(params["location"], vec!["-33.8,151.1".to_string()]);
        assert_eq!(params["keyword"], vec!["thai food".to_string()]);
    }

    #[test]
    fn test_from_query_string_does_not_split_commas() {
        let params = normalize(RawQuery::from_query_string("foo=a,b"));
        assert_eq!(params["foo"], vec!["a,b".to_string()]);
    }

    #[test]
    fn test_from_query_string_empty() {
        assert_eq!(RawQuery::from_query_string(""), RawQuery::new());
    }

    #[test]
    fn test_from_query_string_key_without_value() {
        let params = normalize(RawQuery::from_query_string("keyword"));
        assert_eq!(params["keyword"], vec![String::new()]);
    }

    #[test]
    fn test_collect_replaces_in_place() {
        let raw: RawQuery = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

        let params = normalize(raw);
        let keys: Vec<&String> = params.keys().collect();

        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(params["a"], vec!["3".to_string()]);
    }
}
