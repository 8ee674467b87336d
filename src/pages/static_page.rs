//! Pages declared in the configuration file.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PageConfig;
use crate::error::{ConfigurationError, PageError};
use crate::pages::Page;
use crate::routing::{RouteConfig, Router};

/// A page whose content is a fixed string from config.
#[derive(Debug, Clone)]
pub struct StaticPage {
    config: PageConfig,
}

impl StaticPage {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Page for StaticPage {
    fn paths(&self) -> Vec<String> {
        vec![self.config.path.clone()]
    }

    fn config(&self) -> RouteConfig {
        RouteConfig {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            requires_auth: self.config.requires_auth,
            meta: self.config.meta.clone(),
            seo: self.config.seo.clone(),
        }
    }

    async fn render(&self) -> Result<String, PageError> {
        Ok(self.config.content.clone())
    }
}

/// Register (or re-register) every configured page. Returns how many were
/// registered.
pub fn register_static_pages(
    router: &Router,
    pages: &[PageConfig],
) -> Result<usize, ConfigurationError> {
    for page in pages {
        router.register_page(Arc::new(StaticPage::new(page.clone())))?;
    }
    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_page_carries_config() {
        let page = StaticPage::new(PageConfig {
            path: "pricing".into(),
            title: "Pricing".into(),
            description: "Plans".into(),
            requires_auth: true,
            content: "<h1>Pricing</h1>".into(),
            meta: serde_json::json!({ "section": "sales" }),
            seo: serde_json::Value::Null,
        });

        assert_eq!(page.paths(), ["pricing"]);
        let config = page.config();
        assert_eq!(config.title, "Pricing");
        assert!(config.requires_auth);
        assert_eq!(config.meta["section"], "sales");
        assert_eq!(page.render().await.unwrap(), "<h1>Pricing</h1>");
    }
}
