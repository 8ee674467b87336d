//! Per-attempt navigation state machine.
//!
//! # State Transitions
//! ```text
//! Idle → GuardCheck
//! GuardCheck → Denied → Idle
//! GuardCheck → BeforeHook → Loading → Resolving
//! Resolving → Success → AfterHook → Idle
//! Loading | Resolving → Failure → ErrorDisplay → Idle
//! Resolving → Idle                      (superseded by a newer navigation)
//! ```
//!
//! Every attempt ends in `Idle`; the visited phases are kept on the outcome.

use std::fmt;

use uuid::Uuid;

/// Phase of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    GuardCheck,
    Denied,
    BeforeHook,
    Loading,
    Resolving,
    Success,
    AfterHook,
    Failure,
    ErrorDisplay,
}

impl Phase {
    /// Whether `self → next` is a legal transition.
    pub fn can_transition_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, GuardCheck)
                | (GuardCheck, Denied)
                | (GuardCheck, BeforeHook)
                | (Denied, Idle)
                | (BeforeHook, Loading)
                | (Loading, Resolving)
                | (Loading, Failure)
                | (Resolving, Success)
                | (Resolving, Failure)
                | (Resolving, Idle)
                | (Success, AfterHook)
                | (AfterHook, Idle)
                | (Failure, ErrorDisplay)
                | (ErrorDisplay, Idle)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a navigation attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStatus {
    /// The route's content is displayed.
    Rendered,
    /// The path was unknown; the not-found content is displayed.
    NotFound,
    /// A guard denied; the sink was not touched.
    Denied,
    /// The error panel is displayed.
    Failed,
    /// A newer navigation overtook this one; its content was discarded.
    Superseded,
}

impl NavigationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NavigationStatus::Rendered => "rendered",
            NavigationStatus::NotFound => "not_found",
            NavigationStatus::Denied => "denied",
            NavigationStatus::Failed => "failed",
            NavigationStatus::Superseded => "superseded",
        }
    }
}

/// Result of one settled navigation attempt.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    pub id: Uuid,
    pub path: String,
    pub status: NavigationStatus,
    phases: Vec<Phase>,
}

impl NavigationOutcome {
    /// Phases visited, starting and ending with `Idle`.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// True when new content (page or not-found) was swapped in.
    pub fn is_displayed(&self) -> bool {
        matches!(
            self.status,
            NavigationStatus::Rendered | NavigationStatus::NotFound
        )
    }
}

/// In-flight attempt, advanced by the router step by step.
#[derive(Debug)]
pub(crate) struct Attempt {
    id: Uuid,
    path: String,
    phases: Vec<Phase>,
}

impl Attempt {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.to_string(),
            phases: vec![Phase::Idle],
        }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phases.last().copied().unwrap_or(Phase::Idle)
    }

    pub(crate) fn advance(&mut self, next: Phase) {
        let current = self.phase();
        debug_assert!(
            current.can_transition_to(next),
            "illegal navigation transition {current} → {next}"
        );
        tracing::trace!(from = %current, to = %next, "Navigation phase");
        self.phases.push(next);
    }

    /// Return to `Idle` and produce the outcome.
    pub(crate) fn finish(mut self, status: NavigationStatus) -> NavigationOutcome {
        self.advance(Phase::Idle);
        NavigationOutcome {
            id: self.id,
            path: self.path,
            status,
            phases: self.phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_is_legal() {
        let mut attempt = Attempt::new("home");
        for phase in [
            Phase::GuardCheck,
            Phase::BeforeHook,
            Phase::Loading,
            Phase::Resolving,
            Phase::Success,
            Phase::AfterHook,
        ] {
            attempt.advance(phase);
        }
        let outcome = attempt.finish(NavigationStatus::Rendered);
        assert_eq!(outcome.phases().first(), Some(&Phase::Idle));
        assert_eq!(outcome.phases().last(), Some(&Phase::Idle));
        assert_eq!(outcome.phases().len(), 8);
        assert!(outcome.is_displayed());
    }

    #[test]
    fn test_transition_table() {
        assert!(Phase::GuardCheck.can_transition_to(Phase::Denied));
        assert!(Phase::Resolving.can_transition_to(Phase::Failure));
        assert!(!Phase::Denied.can_transition_to(Phase::Loading));
        assert!(!Phase::Idle.can_transition_to(Phase::Loading));
        assert!(!Phase::AfterHook.can_transition_to(Phase::Failure));
    }

    #[test]
    #[should_panic(expected = "illegal navigation transition")]
    #[cfg(debug_assertions)]
    fn test_illegal_transition_panics_in_debug() {
        let mut attempt = Attempt::new("home");
        attempt.advance(Phase::Success);
    }
}
