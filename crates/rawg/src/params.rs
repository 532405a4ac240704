//! Canonical query parameter set for RAWG list endpoints.

use std::collections::BTreeMap;

use serde::Serialize;

/// Name of the query parameter carrying the API credential.
pub const KEY_PARAM: &str = "key";

/// Ordered mapping from query parameter name to value.
///
/// Backed by a `BTreeMap`, so two sets built from the same inputs serialize
/// to byte-identical query strings. Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, String>);

impl RequestParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set holding only the API credential.
    pub fn with_credential(api_key: &str) -> Self {
        let mut params = Self::new();
        params.insert(KEY_PARAM, api_key);
        params
    }

    /// Sets `name` to `value`, replacing any previous value.
    ///
    /// An empty `value` removes the parameter instead.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if value.is_empty() {
            self.0.remove(name);
        } else {
            self.0.insert(name.to_string(), value);
        }
        self
    }

    /// Returns the value of a parameter, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the API credential, if attached.
    pub fn credential(&self) -> Option<&str> {
        self.get(KEY_PARAM)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameter names in name order.
    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_credential_only_holds_key() {
        let params = RequestParams::with_credential("abc");
        assert_eq!(params.len(), 1);
        assert_eq!(params.credential(), Some("abc"));
    }

    #[test]
    fn empty_value_is_never_stored() {
        let mut params = RequestParams::new();
        params.insert("search", "");
        assert!(!params.contains("search"));
        assert!(params.is_empty());
    }

    #[test]
    fn empty_value_removes_existing() {
        let mut params = RequestParams::new();
        params.insert("search", "zelda");
        params.insert("search", "");
        assert!(!params.contains("search"));
    }

    #[test]
    fn insert_replaces_value() {
        let mut params = RequestParams::with_credential("old");
        params.insert(KEY_PARAM, "new");
        assert_eq!(params.len(), 1);
        assert_eq!(params.credential(), Some("new"));
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut params = RequestParams::new();
        params.insert("page_size", "20").insert("key", "k").insert("page", "1");
        assert_eq!(params.names(), vec!["key", "page", "page_size"]);
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut params = RequestParams::new();
        params.insert("page", "2").insert("search", "halo");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"page":"2","search":"halo"}"#);
    }
}
