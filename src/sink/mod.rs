//! Content sink subsystem.
//!
//! # Responsibilities
//! - Hold the region the router renders into
//! - Replace its whole content in one step
//!
//! # Design Decisions
//! - Whole-string replacement is the only write operation; there is no
//!   partial update, so readers never see two pages mixed
//! - Writes are fallible (file sinks can fail); the router turns a failed
//!   write into an error state

pub mod file;
pub mod memory;

use crate::error::SinkError;

pub use file::FileSink;
pub use memory::MemorySink;

/// The region the router replaces with rendered content.
pub trait ContentSink: Send + Sync {
    /// Replace all content with `content`.
    fn replace(&self, content: &str) -> Result<(), SinkError>;
}
