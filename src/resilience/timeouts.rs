//! Render deadline enforcement.
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from provider errors
//! - The provider future is dropped on timeout; whatever it was doing stops
//!   at its next suspension point

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;

use crate::error::PageError;
use crate::pages::ContentProvider;

/// Run one render, converting panics and deadline overruns into `PageError`.
pub async fn render_once(
    provider: &dyn ContentProvider,
    timeout: Option<Duration>,
) -> Result<String, PageError> {
    let guarded = AssertUnwindSafe(provider.render()).catch_unwind();
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(outcome) => outcome,
            Err(_) => return Err(PageError::timed_out(limit.as_millis())),
        },
        None => guarded.await,
    };
    outcome.unwrap_or_else(|payload| Err(PageError::panicked(payload.as_ref())))
}
