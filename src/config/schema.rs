//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Label used when a page does not declare a title.
pub const DEFAULT_TITLE: &str = "Untitled Page";

/// Placeholder shown while a page is being resolved.
pub const DEFAULT_LOADING_HTML: &str = concat!(
    r#"<div class="loading" role="status" aria-live="polite">"#,
    r#"<span class="spinner"></span><p>Loading…</p></div>"#,
);

/// Panel shown when a page could not be displayed.
pub const DEFAULT_ERROR_HTML: &str = concat!(
    r#"<section class="error-panel" role="alert">"#,
    r#"<h2>Something went wrong</h2>"#,
    r#"<p>This page could not be displayed.</p>"#,
    r#"<button type="button" data-action="reload">Reload</button>"#,
    r#"</section>"#,
);

/// Root configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Navigation behaviour (addresses, fallbacks, placeholders).
    pub router: RouterSettings,

    /// Content provider invocation policy.
    pub rendering: RenderingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Static pages registered as routes at startup and on reload.
    pub pages: Vec<PageConfig>,
}

/// Router settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Prefix of every visible address (e.g., "/" or "/app/").
    pub base_path: String,

    /// Reserved route rendered when a lookup misses.
    pub not_found_path: String,

    /// Route used when the address carries no path.
    pub default_path: String,

    /// Placeholder written to the sink while content resolves.
    pub loading_html: String,

    /// Error panel written to the sink when a navigation fails.
    pub error_html: String,

    /// Discard content resolved by a navigation that a newer one has overtaken.
    pub discard_stale: bool,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            not_found_path: "not-found".to_string(),
            default_path: "home".to_string(),
            loading_html: DEFAULT_LOADING_HTML.to_string(),
            error_html: DEFAULT_ERROR_HTML.to_string(),
            discard_stale: true,
        }
    }
}

/// Rendering policy for content providers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Render timeout in milliseconds (none = wait indefinitely).
    pub timeout_ms: Option<u64>,

    /// Total attempts per render (1 = no retry).
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            max_attempts: 1,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty output for development, JSON for machine parsing.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// A page whose content is declared directly in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    /// Route path (without the base prefix).
    pub path: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub requires_auth: bool,

    /// Rendered content.
    pub content: String,

    /// Opaque metadata for collaborators.
    #[serde(default)]
    pub meta: serde_json::Value,

    /// Opaque SEO settings for collaborators.
    #[serde(default)]
    pub seo: serde_json::Value,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
