//! Microphone recording lifecycle: record, stop, preview, save or discard.

mod artifact;
mod session;
mod ticker;

pub use {
    artifact::{ArtifactHandle, HandleRegistry, RecordingArtifact, WAV_MIME_TYPE},
    session::{RecordingSession, RecordingState, format_elapsed},
};

pub(crate) use ticker::Ticker;

use crate::CoreResult;

use std::future::Future;

/// Source of microphone captures.
pub trait Microphone {
    /// Live capture holding the microphone until finished or dropped.
    type Capture: CaptureStream;

    /// Request microphone access and start buffering audio.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` or `DeviceUnavailable` when access fails.
    fn open(&mut self) -> impl Future<Output = CoreResult<Self::Capture>>;
}

/// An open microphone capture. Dropping it releases the device.
pub trait CaptureStream {
    /// Release the device and encode everything buffered into one artifact.
    fn finish(self) -> CoreResult<RecordingArtifact>;
}

/// Playback of finished recordings.
pub trait Player {
    /// Play `artifact` from the start, or resume it if it is the paused clip.
    fn play(&self, artifact: &RecordingArtifact) -> CoreResult<()>;

    /// Pause the current clip, keeping its position.
    fn pause(&self);

    /// Stop and unload the current clip.
    fn stop(&self);

    /// Returns true once after a clip reaches its end.
    fn take_finished(&self) -> bool {
        false
    }
}
