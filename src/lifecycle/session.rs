//! Navigation session state.
//!
//! Lives from page load to page unload. Constructing a new `SessionState`
//! is the reset; nothing here is persisted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Process-wide navigation counters and the currently displayed path.
#[derive(Debug)]
pub struct SessionState {
    current_path: ArcSwapOption<String>,
    navigations: AtomicU64,
    reloads: AtomicU64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_path: ArcSwapOption::empty(),
            navigations: AtomicU64::new(0),
            reloads: AtomicU64::new(0),
        }
    }

    /// Path whose content is displayed, if any navigation has completed.
    pub fn current_path(&self) -> Option<String> {
        self.current_path.load_full().map(|p| p.as_ref().clone())
    }

    /// Record a successful content swap. Returns the new navigation count.
    pub fn record_swap(&self, path: &str) -> u64 {
        self.current_path.store(Some(Arc::new(path.to_string())));
        self.navigations.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a user-requested reload. Returns the new reload count.
    pub fn record_reload(&self) -> u64 {
        self.reloads.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn navigation_count(&self) -> u64 {
        self.navigations.load(Ordering::SeqCst)
    }

    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::SeqCst)
    }
}
