//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path) / history back-forward
//!     → router.rs (navigation cycle)
//!     → table.rs (exact lookup, not-found fallback)
//!     → guard.rs (ordered guards, first denial stops)
//!     → hooks.rs (before → loading → resolve → swap → after)
//!     → ContentSink replaced with page, not-found or error panel
//!
//! Route table construction (at startup):
//!     Pages / RouteEntry[]
//!     → RouteTable (not-found entry required)
//!     → extended at runtime by register_route (last registration wins)
//! ```
//!
//! # Design Decisions
//! - Exact path lookup, no patterns
//! - Every navigation attempt settles back to `Idle`
//! - Failures never escape a navigation; configuration errors surface at build

pub mod address;
pub mod guard;
pub mod hooks;
pub mod navigation;
pub mod route;
pub mod router;
pub mod table;

pub use address::AddressCodec;
pub use guard::{AuthGuard, Credentials, Guard};
pub use hooks::{ErrorHook, ErrorReport, Hooks, NavigationHook, Severity};
pub use navigation::{NavigationOutcome, NavigationStatus, Phase};
pub use route::{RouteConfig, RouteEntry};
pub use router::{Router, RouterBuilder};
pub use table::{Lookup, RouteTable};
