//! Navigation hooks.
//!
//! # Responsibilities
//! - Notify interested parties before and after a navigation
//! - Receive error reports (warnings for denials and hook failures, errors
//!   for content and sink failures)
//!
//! # Design Decisions
//! - All hooks are optional and best-effort; their failures are logged and
//!   never change the outcome of a navigation
//! - Before/after hooks may suspend; the error hook is synchronous

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{HookError, NavigationError};

/// A callback run at a fixed point of the navigation cycle.
#[async_trait]
pub trait NavigationHook: Send + Sync {
    async fn call(&self, path: &str) -> Result<(), HookError>;
}

#[async_trait]
impl<F, Fut> NavigationHook for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HookError>> + Send + 'static,
{
    async fn call(&self, path: &str) -> Result<(), HookError> {
        (self)(path.to_string()).await
    }
}

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// What the error hook receives.
#[derive(Debug)]
pub struct ErrorReport {
    pub path: String,
    pub severity: Severity,
    pub error: NavigationError,
}

/// Receiver of error reports.
pub trait ErrorHook: Send + Sync {
    fn report(&self, report: &ErrorReport);
}

impl<F> ErrorHook for F
where
    F: Fn(&ErrorReport) + Send + Sync,
{
    fn report(&self, report: &ErrorReport) {
        (self)(report)
    }
}

/// The optional hooks a router is built with.
#[derive(Clone, Default)]
pub struct Hooks {
    pub before: Option<Arc<dyn NavigationHook>>,
    pub after: Option<Arc<dyn NavigationHook>>,
    pub on_error: Option<Arc<dyn ErrorHook>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
