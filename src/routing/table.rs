//! Route table.
//!
//! # Responsibilities
//! - Store route entries keyed by exact path
//! - Resolve a path to its entry, or to the not-found entry on a miss
//!
//! # Design Decisions
//! - Exact string lookup only: no patterns, no parameters
//! - Ordered map so listings are deterministic
//! - Inserting an existing path replaces it (last registration wins); route
//!   tables grow as feature modules register their pages
//! - The not-found entry is held separately, so a lookup can never fail
//!   once the table exists

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ConfigurationError;
use crate::routing::address::normalize_path;
use crate::routing::RouteEntry;

/// Result of a route lookup.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// The path is registered.
    Matched(Arc<RouteEntry>),
    /// The path is unknown; this is the not-found entry.
    Fallback(Arc<RouteEntry>),
}

impl Lookup {
    pub fn entry(&self) -> &Arc<RouteEntry> {
        match self {
            Lookup::Matched(entry) | Lookup::Fallback(entry) => entry,
        }
    }

    pub fn into_entry(self) -> Arc<RouteEntry> {
        match self {
            Lookup::Matched(entry) | Lookup::Fallback(entry) => entry,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Lookup::Fallback(_))
    }
}

/// Mapping from path to route entry, with a mandatory not-found entry.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: BTreeMap<String, Arc<RouteEntry>>,
    not_found: Arc<RouteEntry>,
}

impl RouteTable {
    /// Build a table from `entries`. Later entries overwrite earlier ones with
    /// the same path. Fails if a path is empty (a bare "/" included) or
    /// `not_found_path` is absent.
    pub fn from_entries(
        not_found_path: &str,
        entries: impl IntoIterator<Item = RouteEntry>,
    ) -> Result<Self, ConfigurationError> {
        let mut routes = BTreeMap::new();
        for entry in entries {
            if entry.path().is_empty() {
                return Err(ConfigurationError::EmptyPath);
            }
            routes.insert(entry.path().to_string(), Arc::new(entry));
        }
        let not_found_path = normalize_path(not_found_path);
        let not_found = routes
            .get(not_found_path)
            .cloned()
            .ok_or_else(|| ConfigurationError::MissingNotFound(not_found_path.to_string()))?;
        Ok(Self { routes, not_found })
    }

    /// Insert or replace an entry. Returns the replaced entry, if any.
    pub fn insert(&mut self, entry: Arc<RouteEntry>) -> Option<Arc<RouteEntry>> {
        if entry.path() == self.not_found.path() {
            self.not_found = entry.clone();
        }
        self.routes.insert(entry.path().to_string(), entry)
    }

    pub fn get(&self, path: &str) -> Option<&Arc<RouteEntry>> {
        self.routes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn lookup(&self, path: &str) -> Lookup {
        match self.routes.get(path) {
            Some(entry) => Lookup::Matched(entry.clone()),
            None => Lookup::Fallback(self.not_found.clone()),
        }
    }

    pub fn not_found(&self) -> &Arc<RouteEntry> {
        &self.not_found
    }

    /// Registered paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::StaticContent;

    fn entry(path: &str, html: &str) -> RouteEntry {
        RouteEntry::new(path, StaticContent::new(html))
    }

    fn table() -> RouteTable {
        RouteTable::from_entries(
            "not-found",
            vec![entry("home", "<h1>Home</h1>"), entry("not-found", "<h1>404</h1>")],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_exact_lookup_and_fallback() {
        let table = table();

        let hit = table.lookup("home");
        assert!(!hit.is_fallback());
        assert_eq!(hit.entry().provider().render().await.unwrap(), "<h1>Home</h1>");

        let miss = table.lookup("home/extra");
        assert!(miss.is_fallback());
        assert_eq!(miss.entry().path(), "not-found");

        // no case folding, no prefix matching
        assert!(table.lookup("Home").is_fallback());
        assert!(table.lookup("hom").is_fallback());
    }

    #[test]
    fn test_missing_not_found_is_configuration_error() {
        let err = RouteTable::from_entries("not-found", vec![entry("home", "x")]).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingNotFound("not-found".into()));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err =
            RouteTable::from_entries("not-found", vec![entry("", "x"), entry("not-found", "y")])
                .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyPath);
    }

    #[tokio::test]
    async fn test_slashed_paths_are_reachable() {
        let table = RouteTable::from_entries(
            "/not-found/",
            vec![entry("/faq", "<h1>FAQ</h1>"), entry("not-found", "<h1>404</h1>")],
        )
        .unwrap();

        assert!(table.contains("faq"));
        let hit = table.lookup("faq");
        assert!(!hit.is_fallback());
        assert_eq!(hit.entry().provider().render().await.unwrap(), "<h1>FAQ</h1>");
        assert_eq!(table.not_found().path(), "not-found");
    }

    #[test]
    fn test_root_path_rejected() {
        let err = RouteTable::from_entries("not-found", vec![entry("/", "x"), entry("not-found", "y")])
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyPath);
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let mut table = table();
        let replaced = table.insert(Arc::new(entry("home", "<h1>Home v2</h1>")));
        assert!(replaced.is_some());
        assert_eq!(table.len(), 2);

        let content = table.lookup("home").entry().provider().render().await.unwrap();
        assert_eq!(content, "<h1>Home v2</h1>");
    }

    #[tokio::test]
    async fn test_overwriting_not_found_updates_fallback() {
        let mut table = table();
        table.insert(Arc::new(entry("not-found", "<h1>Lost?</h1>")));

        let content = table.lookup("nowhere").entry().provider().render().await.unwrap();
        assert_eq!(content, "<h1>Lost?</h1>");
    }

    #[test]
    fn test_paths_are_ordered() {
        let mut table = table();
        table.insert(Arc::new(entry("about", "a")));
        let paths: Vec<_> = table.paths().collect();
        assert_eq!(paths, ["about", "home", "not-found"]);
    }
}
