//! Route entries and their metadata.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::schema::DEFAULT_TITLE;
use crate::pages::ContentProvider;
use crate::routing::address::normalize_path;
use crate::routing::Guard;

/// Metadata attached to a route.
///
/// The router never interprets these fields: `requires_auth` is read by
/// guards, `meta` and `seo` by collaborators such as an SEO manager.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteConfig {
    pub title: String,
    pub description: String,
    pub requires_auth: bool,
    pub meta: serde_json::Value,
    pub seo: serde_json::Value,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            requires_auth: false,
            meta: serde_json::Value::Null,
            seo: serde_json::Value::Null,
        }
    }
}

impl RouteConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }
}

/// A content provider bound to a path, with its metadata and guards.
#[derive(Clone)]
pub struct RouteEntry {
    path: String,
    provider: Arc<dyn ContentProvider>,
    config: RouteConfig,
    guards: Vec<Arc<dyn Guard>>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, provider: impl ContentProvider + 'static) -> Self {
        Self::from_shared(path, Arc::new(provider))
    }

    /// Entry whose provider is shared with other routes.
    ///
    /// Leading and trailing slashes are dropped: "/faq/" is stored as "faq",
    /// and "/" becomes the empty path, which the route table rejects.
    pub fn from_shared(path: impl Into<String>, provider: Arc<dyn ContentProvider>) -> Self {
        let path = path.into();
        Self {
            path: normalize_path(&path).to_string(),
            provider,
            config: RouteConfig::default(),
            guards: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a guard; guards run in the order they were added.
    pub fn with_guard(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    pub fn with_guards(mut self, guards: impl IntoIterator<Item = Arc<dyn Guard>>) -> Self {
        self.guards.extend(guards);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    pub fn guards(&self) -> &[Arc<dyn Guard>] {
        &self.guards
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("guards", &self.guards.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::StaticContent;

    #[test]
    fn test_path_is_stored_without_slashes() {
        assert_eq!(RouteEntry::new("/faq", StaticContent::new("x")).path(), "faq");
        assert_eq!(RouteEntry::new("docs/intro/", StaticContent::new("x")).path(), "docs/intro");
        assert_eq!(RouteEntry::new("/", StaticContent::new("x")).path(), "");
    }
}
