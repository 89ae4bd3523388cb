//! Step navigator — advances and retreats a session through its script.
//!
//! The navigator owns no state of its own; it is handed an explicit
//! [`Session`] to mutate, plus the script library for step lookups. All
//! invariants on `Session` are enforced here.

use crate::error::SessionError;
use crate::scripts::{Script, ScriptLibrary, StepDescriptor};

use super::{Session, SessionPhase};

/// Outcome of submitting the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Advanced to the next step.
    Advanced { next_step_index: usize },
    /// The final step was submitted; the session is terminal and the caller
    /// should transition away (and eventually reset).
    Completed,
}

/// Read-only snapshot of the current step, for progress display.
#[derive(Debug, Clone)]
pub struct StepView<'a> {
    pub script_id: &'a str,
    pub script_name: &'a str,
    pub step: &'a StepDescriptor,
    /// 1-based step number for display.
    pub step_number: usize,
    pub total_steps: usize,
}

impl StepView<'_> {
    /// Progress through the script as a percentage, matching the
    /// `(index + 1) / total` progress bar of the original runner.
    pub fn progress_percent(&self) -> u8 {
        ((self.step_number * 100) / self.total_steps) as u8
    }
}

/// Advances/retreats the current step index and validates required input.
pub struct Navigator {
    library: &'static ScriptLibrary,
}

impl Navigator {
    pub fn new(library: &'static ScriptLibrary) -> Self {
        Self { library }
    }

    pub fn builtin() -> Self {
        Self::new(ScriptLibrary::builtin())
    }

    /// Start a session: set the active script, reset the index to 0, clear
    /// any previous responses.
    ///
    /// Unknown script ids are an explicit error here; callers that want the
    /// legacy silent fallback resolve the id through
    /// [`ScriptLibrary::get_or_default`] first. Scripts with no steps (the
    /// premium placeholder areas) are rejected: a zero-length script has no
    /// valid step index and could never complete.
    pub fn start_session<'a>(
        &'a self,
        session: &mut Session,
        script_id: &str,
    ) -> Result<&'a Script, SessionError> {
        let script = self
            .library
            .get(script_id)
            .ok_or_else(|| SessionError::UnknownScript {
                id: script_id.to_string(),
            })?;
        if script.steps.is_empty() {
            return Err(SessionError::NotStartable {
                id: script.id.clone(),
            });
        }
        session.active_script_id = Some(script.id.clone());
        session.current_step_index = 0;
        session.responses.clear();
        session.completed = false;
        tracing::debug!(script = %script.id, "Session started");
        Ok(script)
    }

    /// Submit the current step, optionally with a free-form response.
    ///
    /// If the step requires input and `response` is empty or
    /// whitespace-only, the submission is rejected with
    /// [`SessionError::InputRequired`]: the index does not advance and
    /// `responses` is untouched. Otherwise the response is recorded (only
    /// for steps that require input) and the index advances by exactly one,
    /// or the session completes if this was the last step.
    pub fn submit_step(
        &self,
        session: &mut Session,
        response: Option<&str>,
    ) -> Result<SubmitOutcome, SessionError> {
        let script = self.active_script(session)?;
        if session.completed {
            return Err(SessionError::AlreadyComplete);
        }

        let index = session.current_step_index;
        let step = &script.steps[index];

        if step.requires_input {
            let response = response.unwrap_or("");
            if response.trim().is_empty() {
                return Err(SessionError::InputRequired {
                    step_title: step.title.clone(),
                });
            }
            session.responses.insert(index, response.to_string());
        }

        if index + 1 < script.total_steps() {
            session.current_step_index = index + 1;
            Ok(SubmitOutcome::Advanced {
                next_step_index: index + 1,
            })
        } else {
            session.completed = true;
            tracing::debug!(script = %script.id, "Session complete");
            Ok(SubmitOutcome::Completed)
        }
    }

    /// Move back one step, returning the previously recorded response for
    /// that step (empty string when none) so the caller can restore it into
    /// the input field. Returns `None` at index 0 (no-op) or when no session
    /// is active.
    pub fn go_to_previous_step(&self, session: &mut Session) -> Option<String> {
        if !session.is_active() || session.completed || session.current_step_index == 0 {
            return None;
        }
        session.current_step_index -= 1;
        Some(
            session
                .response(session.current_step_index)
                .unwrap_or("")
                .to_string(),
        )
    }

    /// Read-only view of the current step plus progress counters.
    pub fn current_step<'a>(&'a self, session: &Session) -> Result<StepView<'a>, SessionError> {
        let script = self.active_script(session)?;
        let index = session.current_step_index;
        Ok(StepView {
            script_id: &script.id,
            script_name: &script.name,
            step: &script.steps[index],
            step_number: index + 1,
            total_steps: script.total_steps(),
        })
    }

    /// Derive the lifecycle phase of a session.
    pub fn phase(&self, session: &Session) -> SessionPhase {
        let Some(script) = session
            .active_script_id
            .as_deref()
            .and_then(|id| self.library.get(id))
        else {
            return SessionPhase::Idle;
        };
        if session.completed {
            SessionPhase::Complete
        } else if session.current_step_index + 1 == script.total_steps() {
            SessionPhase::LastStep
        } else {
            SessionPhase::InProgress
        }
    }

    fn active_script<'a>(&'a self, session: &Session) -> Result<&'a Script, SessionError> {
        let id = session
            .active_script_id
            .as_deref()
            .ok_or(SessionError::NoActiveSession)?;
        self.library
            .get(id)
            .ok_or_else(|| SessionError::UnknownScript { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(script_id: &str) -> (Navigator, Session) {
        let navigator = Navigator::builtin();
        let mut session = Session::new();
        navigator.start_session(&mut session, script_id).unwrap();
        (navigator, session)
    }

    #[test]
    fn start_session_resets_state() {
        let navigator = Navigator::builtin();
        let mut session = Session {
            active_script_id: Some("walking".to_string()),
            current_step_index: 4,
            responses: [(1, "old".to_string())].into_iter().collect(),
            completed: true,
        };
        let script = navigator.start_session(&mut session, "timeline").unwrap();
        assert_eq!(script.id, "timeline");
        assert_eq!(session.current_step_index, 0);
        assert!(session.responses.is_empty());
        assert!(!session.completed);
    }

    #[test]
    fn start_session_unknown_script_errors() {
        let navigator = Navigator::builtin();
        let mut session = Session::new();
        let err = navigator.start_session(&mut session, "mind-palace");
        assert!(matches!(err, Err(SessionError::UnknownScript { .. })));
        assert!(!session.is_active());
    }

    #[test]
    fn zero_step_premium_areas_cannot_start() {
        let navigator = Navigator::builtin();
        for id in ["resilience", "strategic", "presence"] {
            let mut session = Session::new();
            let err = navigator.start_session(&mut session, id);
            assert!(matches!(err, Err(SessionError::NotStartable { .. })), "{id}");
            // The rejected start leaves the session idle, so a follow-up
            // submit errors instead of indexing into an empty step list.
            assert!(!session.is_active());
            assert!(matches!(
                navigator.submit_step(&mut session, Some("anything")),
                Err(SessionError::NoActiveSession)
            ));
            assert_eq!(navigator.phase(&session), SessionPhase::Idle);
        }
    }

    #[test]
    fn empty_input_on_required_step_never_advances() {
        // submodality step 0 requires input
        let (navigator, mut session) = start("submodality");
        for response in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = navigator.submit_step(&mut session, response);
            assert!(matches!(err, Err(SessionError::InputRequired { .. })));
            assert_eq!(session.current_step_index, 0);
            assert!(session.responses.is_empty());
        }
    }

    #[test]
    fn optional_step_advances_without_input() {
        // timeline step 0 does not require input
        let (navigator, mut session) = start("timeline");
        let outcome = navigator.submit_step(&mut session, None).unwrap();
        assert_eq!(outcome, SubmitOutcome::Advanced { next_step_index: 1 });
        // No response recorded for an optional step
        assert!(session.responses.is_empty());
    }

    #[test]
    fn responses_recorded_only_for_required_steps() {
        let (navigator, mut session) = start("submodality");
        let script = ScriptLibrary::builtin().get("submodality").unwrap();
        for _ in 0..script.total_steps() {
            navigator.submit_step(&mut session, Some("an answer")).unwrap();
        }
        let required: Vec<usize> = script
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.requires_input)
            .map(|(i, _)| i)
            .collect();
        let recorded: Vec<usize> = session.responses.keys().copied().collect();
        assert_eq!(recorded, required);
    }

    #[test]
    fn six_step_script_completes_on_sixth_submit_not_before() {
        let (navigator, mut session) = start("walking");
        for _ in 0..5 {
            let outcome = navigator.submit_step(&mut session, Some("ok")).unwrap();
            assert!(matches!(outcome, SubmitOutcome::Advanced { .. }));
        }
        assert_eq!(navigator.phase(&session), SessionPhase::LastStep);
        let outcome = navigator.submit_step(&mut session, Some("anchored")).unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(navigator.phase(&session), SessionPhase::Complete);
    }

    #[test]
    fn submit_after_complete_errors() {
        let (navigator, mut session) = start("walking");
        for _ in 0..6 {
            navigator.submit_step(&mut session, Some("ok")).unwrap();
        }
        let err = navigator.submit_step(&mut session, Some("more"));
        assert!(matches!(err, Err(SessionError::AlreadyComplete)));
    }

    #[test]
    fn previous_is_noop_at_index_zero() {
        let (navigator, mut session) = start("submodality");
        assert!(navigator.go_to_previous_step(&mut session).is_none());
        assert_eq!(session.current_step_index, 0);
    }

    #[test]
    fn previous_restores_recorded_response() {
        let (navigator, mut session) = start("submodality");
        navigator
            .submit_step(&mut session, Some("an image in front of me"))
            .unwrap();
        assert_eq!(session.current_step_index, 1);

        let restored = navigator.go_to_previous_step(&mut session).unwrap();
        assert_eq!(session.current_step_index, 0);
        assert_eq!(restored, "an image in front of me");
    }

    #[test]
    fn previous_with_no_recorded_response_restores_empty() {
        // timeline step 0 is optional, so nothing is recorded for it
        let (navigator, mut session) = start("timeline");
        navigator.submit_step(&mut session, None).unwrap();
        let restored = navigator.go_to_previous_step(&mut session).unwrap();
        assert_eq!(restored, "");
    }

    #[test]
    fn current_step_reports_progress() {
        let (navigator, mut session) = start("timeline");
        let view = navigator.current_step(&session).unwrap();
        assert_eq!(view.step_number, 1);
        assert_eq!(view.total_steps, 6);
        assert_eq!(view.step.title, "Access Your Timeline");

        navigator.submit_step(&mut session, None).unwrap();
        let view = navigator.current_step(&session).unwrap();
        assert_eq!(view.step_number, 2);
        assert_eq!(view.progress_percent(), 33);
    }

    #[test]
    fn current_step_without_session_errors() {
        let navigator = Navigator::builtin();
        let session = Session::new();
        assert!(matches!(
            navigator.current_step(&session),
            Err(SessionError::NoActiveSession)
        ));
    }

    #[test]
    fn phase_walks_lifecycle() {
        let navigator = Navigator::builtin();
        let mut session = Session::new();
        assert_eq!(navigator.phase(&session), SessionPhase::Idle);

        navigator.start_session(&mut session, "timeline").unwrap();
        assert_eq!(navigator.phase(&session), SessionPhase::InProgress);

        for _ in 0..5 {
            navigator.submit_step(&mut session, Some("x")).unwrap();
        }
        assert_eq!(navigator.phase(&session), SessionPhase::LastStep);

        navigator.submit_step(&mut session, Some("x")).unwrap();
        assert_eq!(navigator.phase(&session), SessionPhase::Complete);

        session.reset();
        assert_eq!(navigator.phase(&session), SessionPhase::Idle);
    }

    #[test]
    fn index_stays_in_bounds_for_all_scripts() {
        let navigator = Navigator::builtin();
        for script in ScriptLibrary::builtin().all().filter(|s| !s.premium) {
            let mut session = Session::new();
            navigator.start_session(&mut session, &script.id).unwrap();
            loop {
                assert!(session.current_step_index < script.total_steps());
                match navigator.submit_step(&mut session, Some("response")).unwrap() {
                    SubmitOutcome::Advanced { .. } => continue,
                    SubmitOutcome::Completed => break,
                }
            }
        }
    }
}
