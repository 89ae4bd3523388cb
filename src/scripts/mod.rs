//! Static library of guided scripts.
//!
//! A [`Script`] is a named, ordered list of steps defining one belief-change
//! protocol or personal-power exercise. The set of scripts is static
//! configuration, populated once and never mutated at runtime.

mod catalog;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Script id of the default belief-change protocol.
///
/// Unknown ids resolve to this script through [`ScriptLibrary::get_or_default`],
/// mirroring the fallback behavior of the original protocol runner.
pub const DEFAULT_SCRIPT_ID: &str = "submodality";

/// What kind of guided experience a script is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    /// A belief-change protocol (submodality, timeline, walking).
    Protocol,
    /// A personal-power development exercise.
    Exercise,
}

impl std::fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protocol => write!(f, "protocol"),
            Self::Exercise => write!(f, "exercise"),
        }
    }
}

/// One step of a guided script. Immutable, defined at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub title: String,
    /// Instructional text. May contain a `{belief}` placeholder that is
    /// substituted with the user's limiting belief at render time.
    pub instruction: String,
    /// Whether a non-empty free-form response is required to advance.
    pub requires_input: bool,
}

impl StepDescriptor {
    /// Render the instruction, substituting `{belief}` when a belief is known.
    ///
    /// When no belief has been captured yet, the placeholder degrades to a
    /// generic phrase so the text still reads naturally.
    pub fn render_instruction(&self, belief: Option<&str>) -> String {
        let belief = belief.unwrap_or("the belief you want to change");
        self.instruction.replace("{belief}", belief)
    }
}

/// A named, ordered list of steps defining one guided exercise or protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: String,
    pub name: String,
    pub kind: ScriptKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Premium placeholder areas carry no steps; starting one surfaces an
    /// upgrade message instead of a session.
    #[serde(default)]
    pub premium: bool,
    pub steps: Vec<StepDescriptor>,
}

impl Script {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }
}

/// Immutable lookup table of all built-in scripts.
pub struct ScriptLibrary {
    scripts: Vec<Script>,
}

impl ScriptLibrary {
    /// The built-in library, constructed on first access.
    pub fn builtin() -> &'static ScriptLibrary {
        static LIBRARY: OnceLock<ScriptLibrary> = OnceLock::new();
        LIBRARY.get_or_init(|| ScriptLibrary {
            scripts: catalog::builtin_scripts(),
        })
    }

    /// Strict lookup by id.
    pub fn get(&self, id: &str) -> Option<&Script> {
        self.scripts.iter().find(|s| s.id == id)
    }

    /// Lookup with silent fallback to the default protocol for unknown ids.
    pub fn get_or_default(&self, id: &str) -> &Script {
        self.get(id).unwrap_or_else(|| self.default_script())
    }

    pub fn default_script(&self) -> &Script {
        self.get(DEFAULT_SCRIPT_ID)
            .unwrap_or(&self.scripts[0])
    }

    pub fn all(&self) -> impl Iterator<Item = &Script> {
        self.scripts.iter()
    }

    pub fn protocols(&self) -> impl Iterator<Item = &Script> {
        self.scripts
            .iter()
            .filter(|s| s.kind == ScriptKind::Protocol)
    }

    /// Startable (non-premium) power-development exercises.
    pub fn exercises(&self) -> impl Iterator<Item = &Script> {
        self.scripts
            .iter()
            .filter(|s| s.kind == ScriptKind::Exercise && !s.premium)
    }
}
