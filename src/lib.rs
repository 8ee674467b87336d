//! Client-side navigation router for single-page applications.

pub mod config;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod resilience;
pub mod routing;
pub mod sink;

pub use config::AppConfig;
pub use error::{ConfigurationError, NavigationError, PageError};
pub use lifecycle::{SessionState, Shutdown};
pub use routing::{NavigationOutcome, NavigationStatus, RouteConfig, RouteEntry, Router};
