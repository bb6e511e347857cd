//! Navigation targets and resolved locations.

use serde::Serialize;
use std::collections::BTreeMap;

use super::name::{RouteName, View};
use super::props::ViewProps;

/// Positional params captured from the path.
pub type Params = BTreeMap<String, String>;

/// Decoded query string. Keys may repeat (`?page=1&page=2`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(BTreeMap<String, Vec<String>>);

impl Query {
    /// Parse a raw query string, with or without the leading `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            query.append(&key, &value);
        }
        query
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values for `key` (empty when absent).
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.0
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode back into `a=1&b=2` form (no leading `?`).
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

/// Split a URL into path and query, dropping any `#fragment`.
pub(crate) fn split_url(url: &str) -> (&str, &str) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    url.split_once('?').unwrap_or((url, ""))
}

/// Where a navigation wants to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A URL such as `/students?page=2`
    Path(String),
    /// A destination by name, e.g. `404-resource` with `resource = student`
    Named {
        name: RouteName,
        params: Params,
        query: Query,
    },
}

impl NavigationTarget {
    pub fn named(name: RouteName) -> Self {
        Self::Named {
            name,
            params: Params::new(),
            query: Query::default(),
        }
    }

    /// Add a param to a named target. Path targets are left unchanged.
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        if let Self::Named { params, .. } = &mut self {
            params.insert(key.to_string(), value.into());
        }
        self
    }

    /// Add a query value to a named target. Path targets are left unchanged.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        if let Self::Named { query, .. } = &mut self {
            query.append(key, value);
        }
        self
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<RouteName> for NavigationTarget {
    fn from(name: RouteName) -> Self {
        Self::named(name)
    }
}

impl std::fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => f.write_str(path),
            Self::Named { name, params, .. } if params.is_empty() => write!(f, "{name}"),
            Self::Named { name, params, .. } => write!(f, "{name} {params:?}"),
        }
    }
}

/// One destination in the matched chain, with the props derived for its view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedView {
    pub name: RouteName,
    pub view: View,
    pub props: ViewProps,
}

/// A resolved navigation: the leaf destination plus everything matched on
/// the way (layouts first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: RouteName,
    pub path: String,
    pub params: Params,
    pub query: Query,
    pub matched: Vec<MatchedView>,
}

impl Location {
    /// Path plus query string.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.encode())
        }
    }

    /// Props derived for the destination named `name`, if it was matched.
    pub fn props_for(&self, name: RouteName) -> Option<&ViewProps> {
        self.matched
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.props)
    }

    pub fn contains(&self, name: RouteName) -> bool {
        self.matched.iter().any(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parse_keeps_repeated_keys() {
        let query = Query::parse("?page=2&page=3&limit=");
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get_all("page"), ["2".to_string(), "3".to_string()]);
        assert_eq!(query.get("limit"), Some(""));
        assert!(query.get("missing").is_none());
        assert!(query.get_all("missing").is_empty());
    }

    #[test]
    fn test_query_decodes_and_encodes() {
        let query = Query::parse("q=ada+lovelace&tag=a%26b");
        assert_eq!(query.get("q"), Some("ada lovelace"));
        assert_eq!(query.get("tag"), Some("a&b"));
        assert_eq!(query.encode(), "q=ada+lovelace&tag=a%26b");
    }

    #[test]
    fn test_split_url() {
        assert_eq!(split_url("/students?page=2#top"), ("/students", "page=2"));
        assert_eq!(split_url("/students#top"), ("/students", ""));
        assert_eq!(split_url("/"), ("/", ""));
    }

    #[test]
    fn test_named_target_builders() {
        let target = NavigationTarget::named(RouteName::NotFoundResource)
            .with_param("resource", "teacher")
            .with_query("from", "/teacher/9");
        let NavigationTarget::Named { params, query, .. } = &target else {
            panic!("expected a named target");
        };
        assert_eq!(params.get("resource").map(String::as_str), Some("teacher"));
        assert_eq!(query.get("from"), Some("/teacher/9"));

        let path = NavigationTarget::from("/students").with_param("ignored", "x");
        assert_eq!(path, NavigationTarget::Path("/students".to_string()));
    }
}
