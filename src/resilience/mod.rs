//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Content provider invocation:
//!     → timeouts.rs (optional render deadline, panic containment)
//!     → On failure: retries.rs (retry with backoff until attempts run out)
//!     → Final PageError handed back to the router
//! ```
//!
//! # Design Decisions
//! - Defaults are one attempt and no deadline: a provider failure reaches the
//!   router unchanged
//! - A panic counts as a failed attempt, never unwinds into the router
//! - Backoff is jittered and capped

pub mod retries;
pub mod timeouts;

use std::time::Duration;

use crate::config::RenderingConfig;
use crate::error::PageError;
use crate::pages::ContentProvider;

/// How the router invokes content providers.
#[derive(Debug, Clone)]
pub struct RenderPolicy {
    timeout: Option<Duration>,
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::from_config(&RenderingConfig::default())
    }
}

impl RenderPolicy {
    pub fn from_config(config: &RenderingConfig) -> Self {
        Self {
            timeout: config.timeout_ms.map(Duration::from_millis),
            max_attempts: config.max_attempts.max(1),
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Render `provider` under this policy.
    pub async fn render(&self, provider: &dyn ContentProvider) -> Result<String, PageError> {
        retries::with_retries(self.max_attempts, self.base_delay_ms, self.max_delay_ms, || {
            timeouts::render_once(provider, self.timeout)
        })
        .await
    }
}
