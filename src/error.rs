//! Error types shared by the router and its collaborators.
//!
//! # Design Decisions
//! - Provider and hook failures are message-carrying values, not trait objects,
//!   so they can be reported and logged without downcasting
//! - Configuration errors are the only fatal kind; everything that happens
//!   during a navigation attempt is a `NavigationError` and is recovered locally

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// Failure produced by a content provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PageError {
    message: String,
}

impl PageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Provider did not settle within the configured render timeout.
    pub fn timed_out(timeout_ms: u128) -> Self {
        Self::new(format!("render timed out after {}ms", timeout_ms))
    }

    /// Provider panicked while rendering.
    pub fn panicked(payload: &(dyn Any + Send)) -> Self {
        Self::new(format!("page panicked: {}", panic_message(payload)))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for PageError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for PageError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Failure produced by a before/after navigation hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn panicked(payload: &(dyn Any + Send)) -> Self {
        Self::new(format!("hook panicked: {}", panic_message(payload)))
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Fatal misconfiguration of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A route was registered under the empty path.
    #[error("route path must not be empty")]
    EmptyPath,

    /// The reserved fallback route was never registered.
    #[error("not-found route `{0}` is not registered")]
    MissingNotFound(String),
}

/// Failure writing to a content sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Which navigation hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    Before,
    After,
}

impl HookStage {
    pub fn as_str(self) -> &'static str {
        match self {
            HookStage::Before => "before",
            HookStage::After => "after",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can go wrong inside a single navigation attempt.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// A guard refused the navigation. Policy, not a failure.
    #[error("navigation to `{path}` denied by guard")]
    GuardDenied { path: String },

    /// The content provider rejected, panicked or timed out.
    #[error("{source}")]
    Content {
        path: String,
        #[source]
        source: PageError,
    },

    /// A before/after hook rejected or panicked.
    #[error("{stage}-navigation hook failed: {source}")]
    Hook {
        path: String,
        stage: HookStage,
        #[source]
        source: HookError,
    },

    /// The content sink refused a write.
    #[error("content sink write failed: {source}")]
    Sink {
        path: String,
        #[source]
        source: SinkError,
    },
}

impl NavigationError {
    /// Path of the navigation the error belongs to.
    pub fn path(&self) -> &str {
        match self {
            NavigationError::GuardDenied { path }
            | NavigationError::Content { path, .. }
            | NavigationError::Hook { path, .. }
            | NavigationError::Sink { path, .. } => path,
        }
    }
}

/// Best-effort extraction of a panic payload's message.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
