//! History controller abstraction.
//!
//! # Responsibilities
//! - Expose the visible address of the application
//! - Push a new address (adds an entry) or replace the current one (does not)
//! - Notify subscribers when the address is moved by browser chrome
//!   (back/forward), without a payload
//!
//! # Design Decisions
//! - Router only writes through `push`; it never replaces on navigation
//! - Notifications are a broadcast of `()`; subscribers re-read the address
//! - `push` and `replace` never notify, matching `pushState`/`replaceState`

pub mod memory;

use tokio::sync::broadcast;

pub use memory::MemoryHistory;

/// The address/history subsystem the router talks to.
pub trait History: Send + Sync {
    /// The address currently shown (e.g., "/home").
    fn current_address(&self) -> String;

    /// Show `address` as a new history entry.
    fn push(&self, address: &str);

    /// Show `address` in place of the current entry.
    fn replace(&self, address: &str);

    /// Subscribe to back/forward notifications.
    fn subscribe(&self) -> broadcast::Receiver<()>;
}
