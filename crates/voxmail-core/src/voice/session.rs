use crate::{
    AudioFeedback, Capabilities, CoreError, CoreResult, Cue, SessionHolder,
    navigation::{Navigator, Route},
    voice::{
        Command, RecognitionConfig, RecognitionErrorKind, RecognitionEvent, Recognizer,
        dispatch, normalize,
    },
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

const ACTIVATED: &str = "Voice commands activated. What would you like to do?";
const DEACTIVATED: &str = "Voice commands deactivated.";
const UNSUPPORTED: &str = "Speech recognition is not supported on this system.";
const NO_SPEECH: &str = "No speech detected. Please try again.";
const RECOGNITION_ERROR: &str = "Voice recognition error. Please try again.";

/// Whether the voice command loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningState {
    /// Not listening.
    Idle,
    /// Listening, restarting the backend after every natural end.
    Listening,
}

/// Continuous voice-command listener.
///
/// While `Listening`, every natural end of a backend session reopens it.
/// [`stop_listening`](Self::stop_listening) is the only way out of the loop
/// besides a hard recognition error. The restart decision reads the state at
/// the moment the end event is handled, so an end event queued behind a stop
/// never reopens the session.
pub struct VoiceCommandSession<R: Recognizer> {
    recognizer: R,
    feedback: AudioFeedback,
    capabilities: Capabilities,
    config: RecognitionConfig,
    state: ListeningState,
    session_open: bool,
    last_recognized: Option<String>,
}

impl<R: Recognizer> VoiceCommandSession<R> {
    /// Create an idle listener.
    pub fn new(recognizer: R, feedback: AudioFeedback, config: RecognitionConfig) -> Self {
        let capabilities = feedback.capabilities();
        Self {
            recognizer,
            feedback,
            capabilities,
            config,
            state: ListeningState::Idle,
            session_open: false,
            last_recognized: None,
        }
    }

    /// Current listening state.
    pub fn state(&self) -> ListeningState {
        self.state
    }

    /// Whether the loop is running.
    pub fn is_listening(&self) -> bool {
        self.state == ListeningState::Listening
    }

    /// Whether a backend session is currently open.
    pub fn session_open(&self) -> bool {
        self.session_open
    }

    /// The most recent normalized utterance.
    pub fn last_recognized(&self) -> Option<&str> {
        self.last_recognized.as_deref()
    }

    /// Start the listening loop. No-op when already listening.
    ///
    /// # Errors
    ///
    /// `RecognitionUnsupported` when the platform has no recognizer, or the
    /// backend's start error. The state stays idle in both cases.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_listening(&mut self) -> CoreResult<()> {
        if self.is_listening() {
            debug!("Already listening");
            return Ok(());
        }

        if !self.capabilities.has_speech_recognition {
            self.feedback.notify(Cue::Error, UNSUPPORTED);
            return Err(CoreError::RecognitionUnsupported {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Err(e) = self.recognizer.start(&self.config) {
            error!(error = %e, "Failed to start speech recognition");
            self.feedback.notify(Cue::Error, RECOGNITION_ERROR);
            return Err(e);
        }

        self.session_open = true;
        self.state = ListeningState::Listening;
        self.feedback.notify(Cue::Click, ACTIVATED);
        info!(locale = %self.config.locale, "Voice commands activated");

        Ok(())
    }

    /// Stop the listening loop and close the backend session.
    ///
    /// No-op when idle.
    #[instrument(skip(self))]
    pub fn stop_listening(&mut self) {
        if !self.is_listening() {
            debug!("Not listening");
            return;
        }

        self.state = ListeningState::Idle;
        self.close_session();
        self.feedback.notify(Cue::Click, DEACTIVATED);
        info!("Voice commands deactivated");
    }

    /// Start when idle, stop when listening.
    ///
    /// # Errors
    ///
    /// Propagates [`start_listening`](Self::start_listening) errors.
    #[track_caller]
    pub fn toggle_listening(&mut self) -> CoreResult<()> {
        if self.is_listening() {
            self.stop_listening();
            Ok(())
        } else {
            self.start_listening()
        }
    }

    /// Feed one backend event through the state machine.
    ///
    /// Returns the dispatched command for finalized utterances.
    #[instrument(skip(self, identity, navigator))]
    pub fn handle_event(
        &mut self,
        event: RecognitionEvent,
        identity: &mut SessionHolder,
        navigator: &mut dyn Navigator,
    ) -> Option<Command> {
        match event {
            RecognitionEvent::Result(text) => {
                if !self.is_listening() {
                    debug!("Utterance after stop dropped");
                    return None;
                }
                Some(self.execute_command(&text, identity, navigator))
            }
            RecognitionEvent::Error(kind) => {
                self.handle_error(kind);
                None
            }
            RecognitionEvent::End => {
                self.session_open = false;
                if self.is_listening() {
                    self.restart();
                }
                None
            }
        }
    }

    /// Normalize `text`, remember it, and run the dispatcher on it.
    #[instrument(skip(self, identity, navigator))]
    pub fn execute_command(
        &mut self,
        text: &str,
        identity: &mut SessionHolder,
        navigator: &mut dyn Navigator,
    ) -> Command {
        let utterance = normalize(text);
        let command = dispatch(&utterance, identity.is_authenticated());
        self.last_recognized = Some(utterance);

        match &command {
            Command::Logout => identity.logout(),
            Command::Unrecognized(utterance) => {
                let e = CoreError::CommandUnrecognized {
                    utterance: utterance.clone(),
                    location: ErrorLocation::from(Location::caller()),
                };
                debug!(error = %e, "Dispatch found no command");
            }
            _ => {}
        }

        if let Some(route) = command.route() {
            if command == Command::OpenLogin && navigator.current() == &Route::Login {
                debug!("Already on login page");
            } else {
                navigator.navigate(route);
            }
        }

        self.feedback.notify(command.cue(), &command.announcement());
        info!(command = ?command, "Voice command handled");

        command
    }

    fn handle_error(&mut self, kind: RecognitionErrorKind) {
        let e = CoreError::RecognitionFailed {
            kind: kind.clone(),
            location: ErrorLocation::from(Location::caller()),
        };

        if kind == RecognitionErrorKind::NoSpeech {
            // The backend session is over, the loop is not.
            warn!(error = %e, "No speech detected");
            self.session_open = false;
            self.feedback.notify(Cue::Notification, NO_SPEECH);
            return;
        }

        error!(error = %e, "Speech recognition error");
        self.state = ListeningState::Idle;
        self.close_session();
        self.feedback.notify(Cue::Error, RECOGNITION_ERROR);
    }

    fn restart(&mut self) {
        match self.recognizer.start(&self.config) {
            Ok(()) => {
                self.session_open = true;
                debug!("Recognition session restarted");
            }
            Err(e) => {
                error!(error = %e, "Failed to restart speech recognition");
                self.state = ListeningState::Idle;
                self.feedback.notify(Cue::Error, RECOGNITION_ERROR);
            }
        }
    }

    fn close_session(&mut self) {
        self.recognizer.stop();
        self.session_open = false;
    }
}

impl<R: Recognizer> Drop for VoiceCommandSession<R> {
    fn drop(&mut self) {
        if self.session_open {
            self.recognizer.stop();
        }
    }
}
