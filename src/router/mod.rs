//! Keyword intent router — selects which script to start from free text.
//!
//! A crude stand-in for real intent classification: rules are evaluated in a
//! fixed priority order, and the first rule whose keyword set has a
//! case-insensitive substring match in the input wins. Ordering matters
//! because keywords overlap across topics ("belief" appears in several), so
//! the rule list must stay deterministic to keep behavior reproducible.
//!
//! The router is stateless between calls; once a session is active, input
//! bypasses it entirely and feeds the active script's step handler.

use serde::{Deserialize, Serialize};

use crate::scripts::ScriptLibrary;

/// One intent rule: if any keyword matches, route to the target script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    pub keywords: Vec<String>,
    pub target_script_id: String,
}

impl IntentRule {
    pub fn new(keywords: &[&str], target_script_id: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            target_script_id: target_script_id.to_string(),
        }
    }

    fn matches(&self, lowered_text: &str) -> bool {
        self.keywords.iter().any(|k| lowered_text.contains(k.as_str()))
    }
}

/// Result of routing a piece of free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Start the named script.
    StartScript { script_id: String },
    /// No rule matched; show the canned fallback enumerating the options.
    Fallback { message: String },
}

/// Ordered first-match keyword router.
pub struct IntentRouter {
    rules: Vec<IntentRule>,
    fallback_message: String,
}

impl IntentRouter {
    /// The default rule set, in priority order. Specific topics come before
    /// the generic "belief" catch-all so overlapping inputs resolve to the
    /// most specific script.
    pub fn default_rules(library: &ScriptLibrary) -> Self {
        let rules = vec![
            IntentRule::new(
                &["submodalit", "picture", "image", "visualize"],
                "submodality",
            ),
            IntentRule::new(&["timeline", "time line", "memory", "past"], "timeline"),
            IntentRule::new(&["walking", "walk", "movement"], "walking"),
            IntentRule::new(
                &["self-awareness", "aware", "patterns", "triggers"],
                "self-awareness",
            ),
            IntentRule::new(&["vision", "purpose", "direction", "goals"], "vision"),
            IntentRule::new(
                &["communicat", "influence", "persuad"],
                "communication",
            ),
            // Generic belief work defaults to the submodality protocol.
            IntentRule::new(&["belief", "limiting", "reprogram"], "submodality"),
        ];
        Self {
            rules,
            fallback_message: fallback_message(library),
        }
    }

    /// An empty router (for testing); every input falls through.
    pub fn empty(fallback_message: &str) -> Self {
        Self {
            rules: Vec::new(),
            fallback_message: fallback_message.to_string(),
        }
    }

    /// Append a rule at the lowest priority.
    pub fn push_rule(&mut self, rule: IntentRule) {
        self.rules.push(rule);
    }

    /// Route free text to a script id, or to the fallback message.
    pub fn route(&self, text: &str) -> RouteOutcome {
        let lowered = text.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&lowered) {
                tracing::debug!(
                    target_script = %rule.target_script_id,
                    "Input matched intent rule"
                );
                return RouteOutcome::StartScript {
                    script_id: rule.target_script_id.clone(),
                };
            }
        }
        RouteOutcome::Fallback {
            message: self.fallback_message.clone(),
        }
    }
}

/// Canned fallback enumerating the available scripts.
fn fallback_message(library: &ScriptLibrary) -> String {
    let mut lines = vec![
        "I can guide you through a belief-change protocol or a personal power exercise. \
         Try telling me what you'd like to work on, for example:"
            .to_string(),
    ];
    for script in library.protocols() {
        lines.push(format!("  - {} ({})", script.name, script.id));
    }
    for script in library.exercises() {
        lines.push(format!("  - {} ({})", script.name, script.id));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> IntentRouter {
        IntentRouter::default_rules(ScriptLibrary::builtin())
    }

    #[test]
    fn routes_timeline_request() {
        let outcome = router().route("I want to work on my timeline");
        assert_eq!(
            outcome,
            RouteOutcome::StartScript {
                script_id: "timeline".to_string()
            }
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let outcome = router().route("Let's try the WALKING pattern");
        assert_eq!(
            outcome,
            RouteOutcome::StartScript {
                script_id: "walking".to_string()
            }
        );
    }

    #[test]
    fn first_match_wins_on_overlap() {
        // "timeline" (rule 2) and "belief" (last rule) both match; the
        // earlier rule must win.
        let outcome = router().route("a belief from my timeline");
        assert_eq!(
            outcome,
            RouteOutcome::StartScript {
                script_id: "timeline".to_string()
            }
        );
    }

    #[test]
    fn generic_belief_falls_to_submodality() {
        let outcome = router().route("I have a limiting belief about money");
        assert_eq!(
            outcome,
            RouteOutcome::StartScript {
                script_id: "submodality".to_string()
            }
        );
    }

    #[test]
    fn routing_is_deterministic() {
        let text = "help me with my vision and purpose";
        let first = router().route(text);
        for _ in 0..10 {
            assert_eq!(router().route(text), first);
        }
    }

    #[test]
    fn fallback_enumerates_options() {
        let outcome = router().route("hello there");
        let RouteOutcome::Fallback { message } = outcome else {
            panic!("expected fallback");
        };
        assert!(message.contains("Submodality Belief Change"));
        assert!(message.contains("Timeline Reimprinting"));
        assert!(message.contains("Self-Awareness Practice"));
        // Premium areas are not offered
        assert!(!message.contains("Strategic Thinking"));
    }

    #[test]
    fn empty_router_always_falls_back() {
        let router = IntentRouter::empty("nothing here");
        let outcome = router.route("timeline belief walking");
        assert_eq!(
            outcome,
            RouteOutcome::Fallback {
                message: "nothing here".to_string()
            }
        );
    }

    #[test]
    fn pushed_rule_has_lowest_priority() {
        let mut router = router();
        router.push_rule(IntentRule::new(&["timeline"], "walking"));
        // The built-in timeline rule still wins.
        let outcome = router.route("my timeline");
        assert_eq!(
            outcome,
            RouteOutcome::StartScript {
                script_id: "timeline".to_string()
            }
        );
    }
}
