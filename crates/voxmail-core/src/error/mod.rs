use crate::voice::RecognitionErrorKind;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised by the voice-mail core services, with source location tracking.
///
/// None of these are fatal. The service that owns the failing operation has
/// already announced the failure and returned its state machine to a
/// well-defined state by the time the caller sees the error.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The user or platform refused microphone access.
    #[error("Microphone permission denied: {reason} {location}")]
    PermissionDenied {
        /// Description reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No usable microphone, or the device failed while opening.
    #[error("Microphone unavailable: {reason} {location}")]
    DeviceUnavailable {
        /// Description of the device failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A recording is already in progress.
    #[error("Recording already in progress {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform offers no speech recognition.
    #[error("Speech recognition unsupported {location}")]
    RecognitionUnsupported {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recognition backend reported an error.
    #[error("Speech recognition failed: {kind} {location}")]
    RecognitionFailed {
        /// Error kind reported by the backend.
        kind: RecognitionErrorKind,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An utterance matched no known command.
    #[error("Command not recognized: {utterance} {location}")]
    CommandUnrecognized {
        /// The normalized utterance.
        utterance: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The durable identity record could not be parsed.
    #[error("Persisted identity is corrupt: {reason} {location}")]
    PersistedStateCorrupt {
        /// Parser message.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The authentication policy rejected a login attempt.
    #[error("Login failed: {reason} {location}")]
    LoginFailed {
        /// Why the attempt was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Reading or writing the identity store failed.
    #[error("Identity storage error: {reason} {location}")]
    StorageError {
        /// Description of the storage failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Cue or clip playback failed.
    #[error("Audio output error: {reason} {location}")]
    AudioOutput {
        /// Description of the output failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoding or decoding a recording artifact failed.
    #[error("Audio encoding error: {reason} {location}")]
    Encoding {
        /// Description of the codec failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sample-rate conversion failed.
    #[error("Resampling error: {reason} {location}")]
    Resampling {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Speech synthesis failed.
    #[error("Speech synthesis error: {reason} {location}")]
    SpeechSynthesis {
        /// Description of the synthesis failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
