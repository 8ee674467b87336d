//! In-memory history stack.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::history::History;

#[derive(Debug)]
struct Stack {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
}

/// A [`History`] that keeps every entry in memory.
///
/// `back` and `forward` play the role of the browser chrome: they move the
/// current entry and notify subscribers.
#[derive(Debug)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
    notify: broadcast::Sender<()>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_address("/")
    }
}

impl MemoryHistory {
    /// Create a history whose only entry is `address`.
    pub fn with_initial_address(address: impl Into<String>) -> Self {
        let (notify, _) = broadcast::channel(16);
        Self {
            stack: Mutex::new(Stack {
                current: address.into(),
                back: Vec::new(),
                forward: Vec::new(),
            }),
            notify,
        }
    }

    fn stack(&self) -> MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn can_go_back(&self) -> bool {
        !self.stack().back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.stack().forward.is_empty()
    }

    /// Move one entry back. Returns false when there is nothing to go back to.
    pub fn back(&self) -> bool {
        let moved = {
            let mut stack = self.stack();
            match stack.back.pop() {
                Some(previous) => {
                    let current = std::mem::replace(&mut stack.current, previous);
                    stack.forward.push(current);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.fire();
        }
        moved
    }

    /// Move one entry forward. Returns false when there is nothing ahead.
    pub fn forward(&self) -> bool {
        let moved = {
            let mut stack = self.stack();
            match stack.forward.pop() {
                Some(next) => {
                    let current = std::mem::replace(&mut stack.current, next);
                    stack.back.push(current);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.fire();
        }
        moved
    }

    /// Number of entries, the current one included.
    pub fn len(&self) -> usize {
        let stack = self.stack();
        stack.back.len() + 1 + stack.forward.len()
    }

    fn fire(&self) {
        // No subscribers is fine: nobody is listening for popstate yet.
        let _ = self.notify.send(());
    }
}

impl History for MemoryHistory {
    fn current_address(&self) -> String {
        self.stack().current.clone()
    }

    fn push(&self, address: &str) {
        let mut stack = self.stack();
        let previous = std::mem::replace(&mut stack.current, address.to_string());
        stack.back.push(previous);
        stack.forward.clear();
    }

    fn replace(&self, address: &str) {
        self.stack().current = address.to_string();
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_forward() {
        let history = MemoryHistory::default();
        history.push("/home");
        history.push("/about");
        assert_eq!(history.current_address(), "/about");
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.current_address(), "/home");
        assert!(history.can_go_forward());

        assert!(history.forward());
        assert_eq!(history.current_address(), "/about");
        assert!(!history.forward());
    }

    #[test]
    fn test_push_clears_forward_stack() {
        let history = MemoryHistory::with_initial_address("/home");
        history.push("/about");
        history.back();
        history.push("/contact");
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_push_same_address_adds_entry() {
        let history = MemoryHistory::with_initial_address("/home");
        history.push("/home");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_replace_keeps_length() {
        let history = MemoryHistory::with_initial_address("/home");
        history.replace("/login");
        assert_eq!(history.current_address(), "/login");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[tokio::test]
    async fn test_only_chrome_moves_notify() {
        let history = MemoryHistory::with_initial_address("/home");
        let mut rx = history.subscribe();

        history.push("/about");
        history.replace("/about#top");
        assert!(rx.try_recv().is_err());

        history.back();
        assert!(rx.recv().await.is_ok());

        assert!(!history.back());
        assert!(rx.try_recv().is_err());
    }
}
