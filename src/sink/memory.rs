//! In-memory content sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::SinkError;
use crate::sink::ContentSink;

/// Sink backed by an atomically swapped string.
#[derive(Debug)]
pub struct MemorySink {
    content: ArcSwap<String>,
    writes: AtomicU64,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemorySink {
    /// Create a sink already showing `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            content: ArcSwap::from_pointee(initial.into()),
            writes: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current content.
    pub fn content(&self) -> Arc<String> {
        self.content.load_full()
    }

    /// Number of replacements performed so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl ContentSink for MemorySink {
    fn replace(&self, content: &str) -> Result<(), SinkError> {
        self.content.store(Arc::new(content.to_string()));
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_swaps_whole_content() {
        let sink = MemorySink::new("<p>old</p>");
        let before = sink.content();

        sink.replace("<p>new</p>").unwrap();

        assert_eq!(before.as_str(), "<p>old</p>");
        assert_eq!(sink.content().as_str(), "<p>new</p>");
        assert_eq!(sink.write_count(), 1);
    }
}
