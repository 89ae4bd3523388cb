//! Session state for one guided script run.

pub mod navigator;

pub use navigator::{Navigator, StepView, SubmitOutcome};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
///
/// Progresses linearly: Idle → InProgress → LastStep → Complete → back to
/// Idle when the caller acknowledges completion and resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    InProgress,
    LastStep,
    Complete,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::InProgress => "in_progress",
            Self::LastStep => "last_step",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Mutable runtime state tracking progress through one active script.
///
/// Invariants (enforced by [`Navigator`]):
/// - `current_step_index` is within `[0, total_steps)` while active;
/// - `responses` only holds entries for steps already passed;
/// - `active_script_id` is `Some` iff the index is meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub active_script_id: Option<String>,
    pub current_step_index: usize,
    /// Responses keyed by step index, recorded only for steps that
    /// required input.
    pub responses: BTreeMap<usize, String>,
    /// Set once the final step has been submitted; the session is terminal
    /// until reset.
    pub completed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a script is currently active (including the terminal state).
    pub fn is_active(&self) -> bool {
        self.active_script_id.is_some()
    }

    /// Recorded response for a step, if any.
    pub fn response(&self, step_index: usize) -> Option<&str> {
        self.responses.get(&step_index).map(String::as_str)
    }

    /// Destroy the session: back to Idle, everything cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_idle() {
        let session = Session::new();
        assert!(!session.is_active());
        assert_eq!(session.current_step_index, 0);
        assert!(session.responses.is_empty());
        assert!(!session.completed);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session {
            active_script_id: Some("timeline".to_string()),
            current_step_index: 3,
            responses: [(1, "a memory".to_string())].into_iter().collect(),
            completed: false,
        };
        session.reset();
        assert!(!session.is_active());
        assert_eq!(session.current_step_index, 0);
        assert!(session.responses.is_empty());
    }

    #[test]
    fn session_serde_roundtrip() {
        let session = Session {
            active_script_id: Some("walking".to_string()),
            current_step_index: 2,
            responses: [(1, "tense shoulders".to_string())].into_iter().collect(),
            completed: false,
        };
        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.active_script_id.as_deref(), Some("walking"));
        assert_eq!(parsed.current_step_index, 2);
        assert_eq!(parsed.response(1), Some("tense shoulders"));
    }

    #[test]
    fn display_matches_serde() {
        let phases = [
            SessionPhase::Idle,
            SessionPhase::InProgress,
            SessionPhase::LastStep,
            SessionPhase::Complete,
        ];
        for phase in phases {
            let display = format!("{phase}");
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}
