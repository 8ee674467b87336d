//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build route table (demo + static pages) → Router
//!
//! Session (session.rs):
//!     Router records every successful swap and every reload
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl-C → broadcast → popstate listener and config reloader exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: a configuration error at startup is fatal
//! - Session state is handed to the router, never a hidden global

pub mod session;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use session::SessionState;
pub use shutdown::Shutdown;
