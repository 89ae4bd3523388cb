//! ChatEngine — coordinates the intent router, step navigator, and the
//! simulated analysis client behind a single conversational surface.
//!
//! While no session is active, free text goes through the intent router.
//! Once a session is active, input bypasses the router and feeds the active
//! script's step handler, which does its own much narrower branching
//! (affirmative replies to advance optional steps, topic words to pick a
//! development area, back/cancel keywords).
//!
//! Every reply carries the artificial "thinking" delay. Replies are stamped
//! with a generation counter; if a newer message arrives while a reply is
//! still in flight, the stale reply is dropped instead of being appended out
//! of order.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use regex::Regex;
use tokio::sync::RwLock;

use crate::api::{AnalysisApi, BeliefAnalysisRequest, PowerAssessmentRequest};
use crate::error::{ApiError, SessionError};
use crate::router::{IntentRouter, IntentRule, RouteOutcome};
use crate::scripts::{Script, ScriptKind, ScriptLibrary};
use crate::session::{Navigator, Session, SessionPhase, SubmitOutcome};

use super::{Message, Transcript};

/// What the engine is waiting for outside of an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineMode {
    /// Free chat: input goes to the intent router.
    Chat,
    /// The user asked about power development; the next message picks an
    /// area by topic words.
    ChoosingArea,
}

/// The scripted chat assistant.
pub struct ChatEngine {
    library: &'static ScriptLibrary,
    navigator: Navigator,
    router: IntentRouter,
    area_rules: Vec<IntentRule>,
    api: Arc<dyn AnalysisApi>,
    session: RwLock<Session>,
    transcript: RwLock<Transcript>,
    belief: RwLock<Option<String>>,
    mode: RwLock<EngineMode>,
    generation: AtomicU64,
    thinking_delay: Duration,
    affirmative: Regex,
    power_intent: Regex,
}

impl ChatEngine {
    pub fn new(api: Arc<dyn AnalysisApi>, thinking_delay: Duration) -> Self {
        let library = ScriptLibrary::builtin();
        Self {
            library,
            navigator: Navigator::new(library),
            router: IntentRouter::default_rules(library),
            area_rules: area_rules(),
            api,
            session: RwLock::new(Session::new()),
            transcript: RwLock::new(Transcript::new()),
            belief: RwLock::new(None),
            mode: RwLock::new(EngineMode::Chat),
            generation: AtomicU64::new(0),
            thinking_delay,
            affirmative: Regex::new(r"(?i)\b(yes|yeah|yep|sure|ok(ay)?|ready|done|next|continue)\b")
                .expect("affirmative regex"),
            power_intent: Regex::new(r"(?i)\b(power|develop|exercises?)\b")
                .expect("power intent regex"),
        }
    }

    /// Handle one user message: append it, compose the reply, wait out the
    /// thinking delay, and append the reply unless it has gone stale.
    ///
    /// Returns the assistant messages produced (empty when dropped as stale).
    pub async fn send(&self, text: &str) -> Vec<Message> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.transcript.write().await.push(Message::user(text));

        let replies = self.compose_reply(text).await;

        tokio::time::sleep(self.thinking_delay).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Dropping stale reply");
            return Vec::new();
        }
        self.publish(replies).await
    }

    /// Start a script directly (suggestion-button path), bypassing the
    /// router. Unknown ids resolve through the legacy default-script
    /// fallback.
    pub async fn start_script(&self, script_id: &str) -> Vec<Message> {
        let script = self.library.get_or_default(script_id);
        let replies = self.begin_script(&script.id).await;
        self.publish(replies).await
    }

    /// Run the simulated belief analysis and surface the result in chat.
    ///
    /// A missing key degrades to a no-AI notice; a simulated failure is
    /// surfaced inline with a manual-retry hint. Stale results (a newer
    /// message arrived while the call was in flight) are dropped.
    pub async fn analyze(&self, belief: &str, intensity: u8) -> Vec<Message> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.belief.write().await = Some(belief.to_string());

        let request = BeliefAnalysisRequest {
            belief: belief.to_string(),
            intensity,
            context: None,
        };
        let reply = match self.api.analyze_belief(&request).await {
            Ok(analysis) => {
                let mut lines = vec![
                    format!("Here's what I found about \"{belief}\":"),
                    format!("  Category: {}", analysis.category),
                    format!("  Likely root cause: {}", analysis.root_cause),
                    format!("  Impact: {}", analysis.impact),
                    "Recommended protocols:".to_string(),
                ];
                for protocol in &analysis.recommended_protocols {
                    lines.push(format!(
                        "  - {} ({}% match): {}",
                        protocol.name, protocol.suitability, protocol.description
                    ));
                }
                lines.push(
                    "Tell me which protocol you'd like to start, or just describe what you want \
                     to work on."
                        .to_string(),
                );
                lines.join("\n")
            }
            Err(ApiError::MissingApiKey) => {
                "No API key is set, so AI analysis is unavailable. You can still run any \
                 protocol or exercise — just tell me what you'd like to work on. (Set a key with \
                 /key to enable analysis.)"
                    .to_string()
            }
            Err(e) => format!("Analysis failed: {e}. You can try again whenever you're ready."),
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Dropping stale analysis result");
            return Vec::new();
        }
        self.publish(vec![reply]).await
    }

    /// Run the simulated power assessment over self-rated answers.
    pub async fn assess(&self, answers: BTreeMap<String, f32>) -> Vec<Message> {
        let request = PowerAssessmentRequest { answers };
        let reply = match self.api.power_assessment(&request).await {
            Ok(assessment) => {
                let mut lines = vec![format!(
                    "Your overall personal power score: {:.1}/10",
                    assessment.overall_score
                )];
                for dim in &assessment.dimensions {
                    lines.push(format!(
                        "  {} — {:.1}/10: {}",
                        dim.name, dim.score, dim.description
                    ));
                }
                lines.push("Recommendations:".to_string());
                for rec in &assessment.recommendations {
                    lines.push(format!("  - {rec}"));
                }
                lines.join("\n")
            }
            Err(ApiError::MissingApiKey) => {
                "No API key is set, so the assessment is unavailable. You can still start any \
                 power exercise directly."
                    .to_string()
            }
            Err(e) => format!("Assessment failed: {e}. You can try again whenever you're ready."),
        };
        self.publish(vec![reply]).await
    }

    /// Step back within the active session, restoring the prior response.
    pub async fn previous_step(&self) -> Vec<Message> {
        let mut session = self.session.write().await;
        if !session.is_active() {
            drop(session);
            return self
                .publish(vec!["There's no active session right now.".to_string()])
                .await;
        }
        let replies = match self.navigator.go_to_previous_step(&mut session) {
            Some(restored) => {
                let mut replies = vec![self.render_step(&session).await];
                if !restored.is_empty() {
                    replies.push(format!("(Your earlier response: \"{restored}\")"));
                }
                replies
            }
            None => vec!["We're already at the first step.".to_string()],
        };
        drop(session);
        self.publish(replies).await
    }

    /// Clear transcript, session, and captured belief wholesale.
    pub async fn reset(&self) {
        self.session.write().await.reset();
        self.transcript.write().await.clear();
        *self.belief.write().await = None;
        *self.mode.write().await = EngineMode::Chat;
        self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Chat reset");
    }

    /// Snapshot of the transcript.
    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.read().await.messages().to_vec()
    }

    /// Lifecycle phase of the current session.
    pub async fn phase(&self) -> SessionPhase {
        self.navigator.phase(&*self.session.read().await)
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn publish(&self, replies: Vec<String>) -> Vec<Message> {
        let mut transcript = self.transcript.write().await;
        let mut messages = Vec::with_capacity(replies.len());
        for reply in replies {
            let message = Message::assistant(&reply);
            transcript.push(message.clone());
            messages.push(message);
        }
        messages
    }

    async fn compose_reply(&self, text: &str) -> Vec<String> {
        let session_active = self.session.read().await.is_active();
        if session_active {
            return self.handle_in_session(text).await;
        }
        let mode = *self.mode.read().await;
        match mode {
            EngineMode::ChoosingArea => self.handle_area_choice(text).await,
            EngineMode::Chat => self.handle_idle(text).await,
        }
    }

    async fn handle_idle(&self, text: &str) -> Vec<String> {
        if self.power_intent.is_match(text) {
            *self.mode.write().await = EngineMode::ChoosingArea;
            return vec![self.area_list_message()];
        }
        match self.router.route(text) {
            RouteOutcome::StartScript { script_id } => self.begin_script(&script_id).await,
            RouteOutcome::Fallback { message } => vec![message],
        }
    }

    async fn handle_area_choice(&self, text: &str) -> Vec<String> {
        if is_cancel(text) {
            *self.mode.write().await = EngineMode::Chat;
            return vec!["No problem. Tell me what you'd like to work on instead.".to_string()];
        }
        let lowered = text.to_lowercase();
        for rule in &self.area_rules {
            if rule.keywords.iter().any(|k| lowered.contains(k.as_str())) {
                *self.mode.write().await = EngineMode::Chat;
                return self.begin_script(&rule.target_script_id).await;
            }
        }
        vec![format!(
            "I didn't catch which area you meant.\n{}",
            self.area_list_message()
        )]
    }

    async fn handle_in_session(&self, text: &str) -> Vec<String> {
        if is_cancel(text) {
            self.session.write().await.reset();
            *self.mode.write().await = EngineMode::Chat;
            return vec![
                "Okay, we've stopped there. Tell me whenever you'd like to try again.".to_string(),
            ];
        }
        if is_back(text) {
            let mut session = self.session.write().await;
            return match self.navigator.go_to_previous_step(&mut session) {
                Some(restored) => {
                    let mut replies = vec![self.render_step(&session).await];
                    if !restored.is_empty() {
                        replies.push(format!("(Your earlier response: \"{restored}\")"));
                    }
                    replies
                }
                None => vec!["We're already at the first step.".to_string()],
            };
        }

        let mut session = self.session.write().await;
        let requires_input = match self.navigator.current_step(&session) {
            Ok(view) => view.step.requires_input,
            Err(e) => {
                tracing::warn!("Current step lookup failed: {e}");
                session.reset();
                return vec!["Something went wrong with the session; let's start over.".to_string()];
            }
        };

        // Optional steps advance on an affirmative reply; anything else gets
        // a gentle nudge rather than being recorded.
        if !requires_input && !self.affirmative.is_match(text) {
            return vec![
                "Take your time with this step. Say \"ready\" or \"next\" when you'd like to \
                 continue."
                    .to_string(),
            ];
        }

        let response = requires_input.then_some(text);
        match self.navigator.submit_step(&mut session, response) {
            Ok(SubmitOutcome::Advanced { .. }) => vec![self.render_step(&session).await],
            Ok(SubmitOutcome::Completed) => {
                let script_kind = session
                    .active_script_id
                    .as_deref()
                    .and_then(|id| self.library.get(id))
                    .map(|s| s.kind);
                session.reset();
                let what = match script_kind {
                    Some(ScriptKind::Exercise) => "exercise",
                    _ => "protocol",
                };
                vec![format!(
                    "That completes the {what} — well done. Take a moment to notice what feels \
                     different. I'm here whenever you'd like to work on something else."
                )]
            }
            Err(SessionError::InputRequired { .. }) => {
                vec!["Please provide a response before continuing".to_string()]
            }
            Err(e) => {
                tracing::warn!("Submit failed: {e}");
                session.reset();
                vec!["Something went wrong with the session; let's start over.".to_string()]
            }
        }
    }

    async fn begin_script(&self, script_id: &str) -> Vec<String> {
        let Some(script) = self.library.get(script_id) else {
            return vec![format!("I don't know a script called \"{script_id}\".")];
        };
        if script.premium {
            return vec![premium_message(script)];
        }

        let mut session = self.session.write().await;
        if let Err(e) = self.navigator.start_session(&mut session, &script.id) {
            tracing::warn!("Failed to start session: {e}");
            return vec![format!("I couldn't start \"{script_id}\": {e}")];
        }

        let mut replies = Vec::new();
        match script.kind {
            ScriptKind::Protocol => replies.push(format!("Let's begin {}.", script.name)),
            ScriptKind::Exercise => {
                let mut intro = format!("Let's begin {}.", script.name);
                if let Some(description) = &script.description {
                    intro.push(' ');
                    intro.push_str(description);
                }
                replies.push(intro);
            }
        }
        replies.push(self.render_step(&session).await);
        replies
    }

    /// Present the current step: title, progress, rendered instruction, and
    /// how to proceed.
    async fn render_step(&self, session: &Session) -> String {
        let view = match self.navigator.current_step(session) {
            Ok(view) => view,
            Err(e) => return format!("No current step: {e}"),
        };
        let belief = self.belief.read().await;
        let instruction = view.step.render_instruction(belief.as_deref());
        let hint = if view.step.requires_input {
            "Take your time, then share your response."
        } else {
            "When you're ready to continue, say \"ready\"."
        };
        format!(
            "{} (Step {} of {})\n{}\n{}",
            view.step.title, view.step_number, view.total_steps, instruction, hint
        )
    }

    fn area_list_message(&self) -> String {
        let mut lines =
            vec!["Which area of personal power would you like to develop?".to_string()];
        for script in self.library.exercises() {
            let description = script.description.as_deref().unwrap_or("");
            lines.push(format!("  - {}: {}", script.name, description));
        }
        lines.push(
            "Premium areas (Resilience & Adaptability, Strategic Thinking, Personal Presence) \
             require an upgrade."
                .to_string(),
        );
        lines.join("\n")
    }
}

fn area_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(&["aware", "pattern", "trigger"], "self-awareness"),
        IntentRule::new(&["vision", "purpose", "goal", "future"], "vision"),
        IntentRule::new(&["communicat", "influence", "speak"], "communication"),
        IntentRule::new(&["resilien", "setback", "adapt"], "resilience"),
        IntentRule::new(&["strateg", "planning", "decision"], "strategic"),
        IntentRule::new(&["presence", "charisma"], "presence"),
    ]
}

fn premium_message(script: &Script) -> String {
    format!(
        "{} is a premium feature. Upgrade your account to access advanced personal power \
         development exercises.",
        script.name
    )
}

fn is_cancel(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "cancel" | "stop" | "quit" | "never mind" | "nevermind"
    )
}

fn is_back(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "back" | "previous" | "go back")
}
