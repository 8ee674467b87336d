//! Page providers.
//!
//! # Responsibilities
//! - Define what the router calls to obtain content (`ContentProvider`)
//! - Define the unit feature code registers (`Page`): paths, metadata,
//!   guards and a render operation
//! - Ship the static and demo pages used by the binary
//!
//! # Design Decisions
//! - Closures returning futures are providers, so one-off routes need no type
//! - A page registered under several paths shares one provider instance

pub mod demo;
pub mod static_page;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PageError;
use crate::routing::{Guard, RouteConfig, RouteEntry};

pub use static_page::StaticPage;

/// Asynchronous, argument-less producer of rendered content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn render(&self) -> Result<String, PageError>;
}

#[async_trait]
impl<F, Fut> ContentProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, PageError>> + Send + 'static,
{
    async fn render(&self) -> Result<String, PageError> {
        (self)().await
    }
}

/// Provider that always renders the same string.
#[derive(Debug, Clone)]
pub struct StaticContent(String);

impl StaticContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }
}

#[async_trait]
impl ContentProvider for StaticContent {
    async fn render(&self) -> Result<String, PageError> {
        Ok(self.0.clone())
    }
}

/// A unit of the application that owns one or more routes.
#[async_trait]
pub trait Page: Send + Sync {
    /// Paths this page registers under.
    fn paths(&self) -> Vec<String>;

    /// Route metadata; defaults to a generic title and no auth requirement.
    fn config(&self) -> RouteConfig {
        RouteConfig::default()
    }

    /// Guards evaluated before this page is shown, in order.
    fn guards(&self) -> Vec<Arc<dyn Guard>> {
        Vec::new()
    }

    async fn render(&self) -> Result<String, PageError>;
}

struct PageContent(Arc<dyn Page>);

#[async_trait]
impl ContentProvider for PageContent {
    async fn render(&self) -> Result<String, PageError> {
        self.0.render().await
    }
}

/// One route entry per path the page declares.
pub fn entries_for(page: Arc<dyn Page>) -> Vec<RouteEntry> {
    let provider: Arc<dyn ContentProvider> = Arc::new(PageContent(page.clone()));
    let config = page.config();
    let guards = page.guards();
    page.paths()
        .into_iter()
        .map(|path| {
            RouteEntry::from_shared(path, provider.clone())
                .with_config(config.clone())
                .with_guards(guards.iter().cloned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Contact;

    #[async_trait]
    impl Page for Contact {
        fn paths(&self) -> Vec<String> {
            vec!["contact".into(), "support".into()]
        }

        fn config(&self) -> RouteConfig {
            RouteConfig::titled("Contact")
        }

        async fn render(&self) -> Result<String, PageError> {
            Ok("<h1>Contact</h1>".into())
        }
    }

    #[tokio::test]
    async fn test_page_registers_every_path() {
        let entries = entries_for(Arc::new(Contact));
        let paths: Vec<_> = entries.iter().map(|e| e.path().to_string()).collect();
        assert_eq!(paths, ["contact", "support"]);

        for entry in &entries {
            assert_eq!(entry.config().title, "Contact");
            assert_eq!(entry.provider().render().await.unwrap(), "<h1>Contact</h1>");
        }
    }

    #[tokio::test]
    async fn test_static_content() {
        let provider = StaticContent::new("<p>hi</p>");
        assert_eq!(provider.render().await.unwrap(), "<p>hi</p>");
    }
}
