//! Continuous voice-command listening and utterance dispatch.

mod dispatcher;
mod session;

pub use {
    dispatcher::{Command, dispatch, normalize},
    session::{ListeningState, VoiceCommandSession},
};

use crate::CoreResult;

use std::fmt;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// How a recognition session is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    /// Keep the session open across utterances.
    pub continuous: bool,
    /// Deliver partial hypotheses. Always false for command capture.
    pub interim_results: bool,
    /// BCP 47 language tag.
    pub locale: String,
}

impl RecognitionConfig {
    /// Continuous, final-results-only capture in `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            continuous: true,
            interim_results: false,
            locale: locale.into(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

/// Error kinds reported by a recognition backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorKind {
    /// The session heard nothing before timing out.
    NoSpeech,
    /// The session was aborted by the platform.
    Aborted,
    /// Audio capture for recognition failed.
    AudioCapture,
    /// The user or platform refused access.
    NotAllowed,
    /// The recognition service could not be reached.
    Network,
    /// Anything else, with the backend's own label.
    Other(String),
}

impl fmt::Display for RecognitionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionErrorKind::NoSpeech => f.write_str("no-speech"),
            RecognitionErrorKind::Aborted => f.write_str("aborted"),
            RecognitionErrorKind::AudioCapture => f.write_str("audio-capture"),
            RecognitionErrorKind::NotAllowed => f.write_str("not-allowed"),
            RecognitionErrorKind::Network => f.write_str("network"),
            RecognitionErrorKind::Other(label) => f.write_str(label),
        }
    }
}

/// Events a recognition backend delivers back into the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// A finalized utterance, as transcribed.
    Result(String),
    /// The session failed.
    Error(RecognitionErrorKind),
    /// The session ended naturally.
    End,
}

/// Speech recognition backend.
///
/// Events produced by an open session are delivered to
/// [`VoiceCommandSession::handle_event`] by whoever owns the event loop.
pub trait Recognizer {
    /// Open a session.
    ///
    /// # Errors
    ///
    /// Returns error if the backend refuses to start.
    fn start(&mut self, config: &RecognitionConfig) -> CoreResult<()>;

    /// Close the session immediately.
    fn stop(&mut self);
}
