//! Demo pages shipped with the binary.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PageError;
use crate::lifecycle::SessionState;
use crate::pages::Page;
use crate::routing::{Guard, RouteConfig};

pub struct HomePage;

#[async_trait]
impl Page for HomePage {
    fn paths(&self) -> Vec<String> {
        vec!["home".into()]
    }

    fn config(&self) -> RouteConfig {
        RouteConfig::titled("Home").description("Start page")
    }

    async fn render(&self) -> Result<String, PageError> {
        Ok(concat!(
            "<section class=\"page home\">",
            "<h1>Home</h1>",
            "<p>Pick a page from the navigation bar.</p>",
            "</section>"
        )
        .to_string())
    }
}

pub struct AboutPage;

#[async_trait]
impl Page for AboutPage {
    fn paths(&self) -> Vec<String> {
        vec!["about".into()]
    }

    fn config(&self) -> RouteConfig {
        RouteConfig::titled("About").description("What this application is")
    }

    async fn render(&self) -> Result<String, PageError> {
        Ok(concat!(
            "<section class=\"page about\">",
            "<h1>About</h1>",
            "<p>A single-page application without a framework.</p>",
            "</section>"
        )
        .to_string())
    }
}

pub struct LoginPage;

#[async_trait]
impl Page for LoginPage {
    fn paths(&self) -> Vec<String> {
        vec!["login".into()]
    }

    fn config(&self) -> RouteConfig {
        RouteConfig::titled("Sign in")
    }

    async fn render(&self) -> Result<String, PageError> {
        Ok(concat!(
            "<section class=\"page login\">",
            "<h1>Sign in</h1>",
            "<form data-action=\"sign-in\">",
            "<input name=\"email\" type=\"email\" required>",
            "<input name=\"password\" type=\"password\" required>",
            "<button type=\"submit\">Sign in</button>",
            "</form>",
            "</section>"
        )
        .to_string())
    }
}

/// Signed-in area; shows the session's navigation counter.
pub struct DashboardPage {
    session: Arc<SessionState>,
    guard: Arc<dyn Guard>,
}

impl DashboardPage {
    pub fn new(session: Arc<SessionState>, guard: Arc<dyn Guard>) -> Self {
        Self { session, guard }
    }
}

#[async_trait]
impl Page for DashboardPage {
    fn paths(&self) -> Vec<String> {
        vec!["dashboard".into()]
    }

    fn config(&self) -> RouteConfig {
        RouteConfig::titled("Dashboard").requires_auth(true)
    }

    fn guards(&self) -> Vec<Arc<dyn Guard>> {
        vec![self.guard.clone()]
    }

    async fn render(&self) -> Result<String, PageError> {
        Ok(format!(
            concat!(
                "<section class=\"page dashboard\">",
                "<h1>Dashboard</h1>",
                "<p>Pages viewed this session: <span class=\"counter\">{}</span></p>",
                "</section>"
            ),
            self.session.navigation_count()
        ))
    }
}

pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Page for NotFoundPage {
    fn paths(&self) -> Vec<String> {
        vec![self.path.clone()]
    }

    fn config(&self) -> RouteConfig {
        RouteConfig::titled("Page not found")
    }

    async fn render(&self) -> Result<String, PageError> {
        Ok(concat!(
            "<section class=\"page not-found\">",
            "<h1>404</h1>",
            "<p>Nothing lives at this address.</p>",
            "<a href=\"/home\" data-link>Back home</a>",
            "</section>"
        )
        .to_string())
    }
}
