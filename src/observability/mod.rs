//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and collaborators produce:
//!     → tracing events, one `navigation` span per attempt
//!       (navigation_id, path, generation fields)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → whatever recorder the host application installs
//! ```

pub mod logging;
pub mod metrics;
