//! Speech capabilities — optional text-to-speech and speech-to-text.
//!
//! Both capabilities are modeled as explicit traits with capability probing:
//! when a capability is absent the corresponding control is hidden, never a
//! crash. Recognition delivers a stream of incremental transcript events;
//! each event replaces the current draft text (see [`DraftBuffer`]).

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;
use futures::stream;

use crate::error::SpeechError;

/// One incremental transcript update from the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEvent {
    pub text: String,
    /// Interim events refine the draft; a final event commits it.
    pub is_final: bool,
}

impl TranscriptEvent {
    pub fn interim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: false,
        }
    }

    pub fn fin(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: true,
        }
    }
}

pub type TranscriptStream = Pin<Box<dyn Stream<Item = TranscriptEvent> + Send>>;

/// Text-to-speech: speak/pause/resume/stop.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
    async fn pause(&self) -> Result<(), SpeechError>;
    async fn resume(&self) -> Result<(), SpeechError>;
    async fn stop(&self) -> Result<(), SpeechError>;
}

/// Speech-to-text: start a recognition stream, stop it.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn start(&self) -> Result<TranscriptStream, SpeechError>;
    async fn stop(&self) -> Result<(), SpeechError>;
}

/// What speech support the platform offers. `None` fields mean the control
/// is hidden.
#[derive(Clone, Default)]
pub struct SpeechCapabilities {
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

impl SpeechCapabilities {
    /// No speech support at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Probe the platform.
    ///
    /// The terminal build has no real audio backend; when speaking is
    /// requested, instructions are echoed through [`ConsoleSynthesizer`].
    /// Recognition is never available here.
    pub fn detect(speak_instructions: bool) -> Self {
        Self {
            synthesizer: speak_instructions
                .then(|| Arc::new(ConsoleSynthesizer) as Arc<dyn SpeechSynthesizer>),
            recognizer: None,
        }
    }

    pub fn can_speak(&self) -> bool {
        self.synthesizer.is_some()
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_some()
    }
}

/// Stand-in synthesizer that writes spoken text to stderr.
pub struct ConsoleSynthesizer;

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        eprintln!("🔊 {text}");
        Ok(())
    }

    async fn pause(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn resume(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Recognizer that replays a fixed event sequence, for tests.
pub struct ScriptedRecognizer {
    events: Vec<TranscriptEvent>,
}

impl ScriptedRecognizer {
    pub fn new(events: Vec<TranscriptEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn start(&self) -> Result<TranscriptStream, SpeechError> {
        Ok(Box::pin(stream::iter(self.events.clone())))
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Draft text driven by transcript events.
///
/// Each event replaces the draft wholesale (never appends); a final event
/// commits and clears it.
#[derive(Debug, Default)]
pub struct DraftBuffer {
    current: String,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns the committed text when the event is final.
    pub fn apply(&mut self, event: &TranscriptEvent) -> Option<String> {
        self.current = event.text.clone();
        if event.is_final {
            Some(std::mem::take(&mut self.current))
        } else {
            None
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }
}
