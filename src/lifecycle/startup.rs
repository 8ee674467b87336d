//! Startup orchestration.
//!
//! # Responsibilities
//! - Assemble the demo pages and the configured static pages
//! - Wire the error hook to the log
//! - Build the router from validated configuration
//!
//! # Design Decisions
//! - Static pages are registered after the demo pages, so config can
//!   override any of them
//! - The not-found page is registered under the configured reserved path

use std::sync::Arc;

use crate::config::{AppConfig, PageConfig};
use crate::error::ConfigurationError;
use crate::history::History;
use crate::lifecycle::SessionState;
use crate::pages::demo::{AboutPage, DashboardPage, HomePage, LoginPage, NotFoundPage};
use crate::pages::StaticPage;
use crate::routing::{AddressCodec, AuthGuard, Credentials, ErrorReport, Router, Severity};
use crate::sink::ContentSink;

/// Collaborators the application is built from.
pub struct Collaborators {
    pub history: Arc<dyn History>,
    pub sink: Arc<dyn ContentSink>,
    pub session: Arc<SessionState>,
    pub credentials: Arc<Credentials>,
}

/// Build the application router.
pub fn build_router(
    config: &AppConfig,
    collaborators: Collaborators,
) -> Result<Router, ConfigurationError> {
    let Collaborators {
        history,
        sink,
        session,
        credentials,
    } = collaborators;

    let addresses = AddressCodec::from_settings(&config.router);
    let auth = Arc::new(AuthGuard::new(
        credentials,
        history.clone(),
        addresses.address_for("login"),
    ));

    let mut builder = Router::builder(history, sink)
        .settings(config.router.clone())
        .rendering(config.rendering.clone())
        .session(session.clone())
        .on_error(log_report)
        .page(Arc::new(HomePage))
        .page(Arc::new(AboutPage))
        .page(Arc::new(LoginPage))
        .page(Arc::new(DashboardPage::new(session, auth)))
        .page(Arc::new(NotFoundPage::new(config.router.not_found_path.clone())));

    for page in &config.pages {
        builder = builder.page(Arc::new(StaticPage::new(page.clone())));
    }

    let router = builder.build()?;
    tracing::info!(routes = router.routes().len(), "Router ready");
    Ok(router)
}

/// Re-register pages from a reloaded configuration, then redraw the page
/// the address points at. Not a user reload: the session's reload counter
/// is left alone.
pub async fn apply_page_updates(router: &Router, pages: &[PageConfig]) {
    match crate::pages::static_page::register_static_pages(router, pages) {
        Ok(count) => tracing::info!(pages = count, "Static pages re-registered"),
        Err(e) => {
            tracing::error!(error = %e, "Static pages rejected");
            return;
        }
    }
    router.update_content(&router.current_path()).await;
}

fn log_report(report: &ErrorReport) {
    match report.severity {
        Severity::Warning => {
            tracing::warn!(path = %report.path, error = %report.error, "Navigation warning")
        }
        Severity::Error => {
            tracing::error!(path = %report.path, error = %report.error, "Navigation error")
        }
    }
}
