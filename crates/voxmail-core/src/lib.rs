//! Voxmail Core Library
//!
//! Accessibility-first voice messaging services: audio cues and spoken
//! announcements, a microphone recording state machine, a continuous
//! voice-command listener with its command dispatcher, and a simulated
//! signed-in identity.
//!
//! Platform capabilities (speech, recognition, microphone, playback) sit
//! behind small traits so each service can run against real devices or
//! test doubles.
//!
//! # Example
//!
//! ```no_run
//! use voxmail_core::{
//!     AudioFeedback, AudioOutput, Capabilities, CoreResult, CpalMicrophone, CuePlayer,
//!     HandleRegistry, Player, RecordingSession, Speaker,
//! };
//!
//! use std::{rc::Rc, time::Duration};
//!
//! struct Silent;
//!
//! impl Speaker for Silent {
//!     fn cancel(&self) {}
//!     fn speak(&self, _text: &str) -> CoreResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> CoreResult<()> {
//!     let output = Rc::new(AudioOutput::new(0.3)?);
//!     let cues: Rc<dyn CuePlayer> = output.clone();
//!     let player: Rc<dyn Player> = output;
//!     let feedback = AudioFeedback::new(cues, Rc::new(Silent), Capabilities::all());
//!
//!     let mut recorder =
//!         RecordingSession::new(CpalMicrophone::new(), player, feedback, HandleRegistry::new());
//!
//!     recorder.start().await?;
//!     tokio::time::sleep(Duration::from_secs(3)).await;
//!     if let Some(artifact) = recorder.stop()? {
//!         println!("Recorded {} bytes of {}", artifact.len(), artifact.mime_type());
//!     }
//!     Ok(())
//! }
//! ```

mod audio;
mod capabilities;
mod error;
mod feedback;
mod identity;
mod navigation;
mod recording;
mod voice;

pub use {
    audio::{AudioOutput, CpalCapture, CpalMicrophone, SilentOutput},
    capabilities::Capabilities,
    error::{CoreError, Result as CoreResult},
    feedback::{AudioFeedback, Cue, CuePlayer, Speaker},
    identity::{
        AuthPolicy, DemoAuthPolicy, Identity, IdentityStore, LoginMethod, MemoryIdentityStore,
        SessionHolder,
    },
    navigation::{Navigator, Route},
    recording::{
        ArtifactHandle, CaptureStream, HandleRegistry, Microphone, Player, RecordingArtifact,
        RecordingSession, RecordingState, WAV_MIME_TYPE, format_elapsed,
    },
    voice::{
        Command, DEFAULT_LOCALE, ListeningState, RecognitionConfig, RecognitionErrorKind,
        RecognitionEvent, Recognizer, VoiceCommandSession, dispatch, normalize,
    },
};

#[cfg(test)]
mod tests;
