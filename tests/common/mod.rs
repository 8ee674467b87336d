//! Shared fixtures for router integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use spa_router::error::{HookError, PageError};
use spa_router::history::MemoryHistory;
use spa_router::pages::StaticContent;
use spa_router::routing::{ErrorReport, RouteEntry, RouterBuilder, Severity};
use spa_router::sink::MemorySink;
use spa_router::Router;

pub const HOME: &str = "<h1>Home</h1>";
pub const NOT_FOUND: &str = "<h1>404</h1>";

/// Router wired to in-memory collaborators.
pub struct Harness {
    pub history: Arc<MemoryHistory>,
    pub sink: Arc<MemorySink>,
    pub errors: Arc<ErrorLog>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            history: Arc::new(MemoryHistory::default()),
            sink: Arc::new(MemorySink::new("<p>initial</p>")),
            errors: Arc::new(ErrorLog::default()),
        }
    }

    /// Builder with `home`, `not-found` and the recording error hook.
    pub fn builder(&self) -> RouterBuilder {
        let errors = self.errors.clone();
        Router::builder(self.history.clone(), self.sink.clone())
            .route(page("home", HOME))
            .route(page("not-found", NOT_FOUND))
            .on_error(move |report: &ErrorReport| errors.record(report))
    }

    pub fn content(&self) -> String {
        self.sink.content().as_str().to_string()
    }
}

pub fn page(path: &str, html: &str) -> RouteEntry {
    RouteEntry::new(path, StaticContent::new(html))
}

/// Route whose provider always rejects with `reason`.
pub fn failing(path: &str, reason: &'static str) -> RouteEntry {
    RouteEntry::new(path, move || async move { Err::<String, _>(PageError::new(reason)) })
}

/// Route whose provider resolves after `delay`.
pub fn slow(path: &str, html: &'static str, delay: Duration) -> RouteEntry {
    RouteEntry::new(path, move || async move {
        tokio::time::sleep(delay).await;
        Ok::<_, PageError>(html.to_string())
    })
}

/// Everything the error hook received, as (error, path, severity).
#[derive(Default)]
pub struct ErrorLog {
    entries: Mutex<Vec<(String, String, Severity)>>,
}

impl ErrorLog {
    pub fn record(&self, report: &ErrorReport) {
        self.entries.lock().unwrap().push((
            report.error.to_string(),
            report.path.clone(),
            report.severity,
        ));
    }

    pub fn entries(&self) -> Vec<(String, String, Severity)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.entries()
            .into_iter()
            .filter(|(_, _, s)| *s == Severity::Error)
            .map(|(e, p, _)| (e, p))
            .collect()
    }

    pub fn warnings(&self) -> usize {
        self.entries()
            .iter()
            .filter(|(_, _, s)| *s == Severity::Warning)
            .count()
    }
}

/// Ordered log of hook calls, shared by recording hooks.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Navigation hook that records `label:path` and succeeds.
    pub fn hook(
        &self,
        label: &'static str,
    ) -> impl Fn(String) -> std::future::Ready<Result<(), HookError>> + Send + Sync + 'static {
        let log = self.clone();
        move |path: String| {
            log.push(format!("{label}:{path}"));
            std::future::ready(Ok(()))
        }
    }
}
