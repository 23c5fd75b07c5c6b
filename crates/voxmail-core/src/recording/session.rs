use crate::{
    AudioFeedback, Capabilities, CoreError, CoreResult, Cue,
    recording::{
        ArtifactHandle, CaptureStream, HandleRegistry, Microphone, Player, RecordingArtifact,
        Ticker,
    },
};

use std::{
    panic::Location,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Instant,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const STARTED: &str = "Recording started. Speak now.";
const STOPPED: &str = "Recording stopped. You can now play back your message.";
const DELETED: &str = "Recording deleted.";
const SAVED: &str = "Recording saved successfully.";
const PLAYING: &str = "Playing your recorded message.";
const PLAYBACK_COMPLETE: &str = "Playback complete.";
const MIC_FAILED: &str =
    "Could not access microphone. Please ensure microphone permissions are enabled.";
const FINALIZE_FAILED: &str = "Recording could not be saved. Please try again.";

/// Observable state of a [`RecordingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Nothing recorded.
    Idle,
    /// Microphone open and buffering.
    Recording,
    /// A finished artifact is available for preview.
    Recorded,
}

enum Phase<C> {
    Idle,
    Recording {
        session_id: Uuid,
        started_at: Instant,
        capture: C,
        // Held for its Drop.
        _ticker: Ticker,
    },
    Recorded {
        artifact: RecordingArtifact,
        handle: ArtifactHandle,
    },
}

/// Single-microphone recording state machine.
///
/// The microphone capture and the tick timer exist only while recording.
/// The playback handle exists only while recorded. Both are released on
/// every exit from their state, including drop.
pub struct RecordingSession<M: Microphone> {
    microphone: M,
    player: Rc<dyn Player>,
    feedback: AudioFeedback,
    capabilities: Capabilities,
    handles: HandleRegistry,
    elapsed: Arc<AtomicU64>,
    phase: Phase<M::Capture>,
}

impl<M: Microphone> RecordingSession<M> {
    /// Create an idle session.
    pub fn new(
        microphone: M,
        player: Rc<dyn Player>,
        feedback: AudioFeedback,
        handles: HandleRegistry,
    ) -> Self {
        let capabilities = feedback.capabilities();
        Self {
            microphone,
            player,
            feedback,
            capabilities,
            handles,
            elapsed: Arc::new(AtomicU64::new(0)),
            phase: Phase::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> RecordingState {
        match self.phase {
            Phase::Idle => RecordingState::Idle,
            Phase::Recording { .. } => RecordingState::Recording,
            Phase::Recorded { .. } => RecordingState::Recorded,
        }
    }

    /// Whole seconds counted by the tick timer for the current or last recording.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Acquire)
    }

    /// Whether the tick timer is running.
    pub fn timer_active(&self) -> bool {
        matches!(self.phase, Phase::Recording { .. })
    }

    /// The finished artifact while recorded.
    pub fn artifact(&self) -> Option<&RecordingArtifact> {
        match &self.phase {
            Phase::Recorded { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    /// Open the microphone and begin recording.
    ///
    /// A previous unsaved recording is discarded first. Starting while
    /// already recording is rejected and leaves the capture untouched.
    ///
    /// # Errors
    ///
    /// `AlreadyRecording`, `DeviceUnavailable` or `PermissionDenied`. On
    /// microphone failure the error cue and announcement have already been
    /// emitted and the session is idle.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> CoreResult<()> {
        match self.phase {
            Phase::Recording { session_id, .. } => {
                warn!(session_id = %session_id, "Start ignored, already recording");
                return Err(CoreError::AlreadyRecording {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Phase::Recorded { .. } => {
                self.player.stop();
                self.phase = Phase::Idle;
                self.elapsed.store(0, Ordering::Release);
                debug!("Previous recording discarded for new recording");
            }
            Phase::Idle => {}
        }

        if !self.capabilities.has_microphone {
            self.feedback.notify(Cue::Error, MIC_FAILED);
            return Err(CoreError::DeviceUnavailable {
                reason: "No microphone available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let capture = match self.microphone.open().await {
            Ok(capture) => capture,
            Err(e) => {
                warn!(error = %e, "Microphone access failed");
                self.feedback.notify(Cue::Error, MIC_FAILED);
                return Err(e);
            }
        };

        let session_id = Uuid::new_v4();
        self.phase = Phase::Recording {
            session_id,
            started_at: Instant::now(),
            capture,
            _ticker: Ticker::start(Arc::clone(&self.elapsed)),
        };

        self.feedback.notify(Cue::Recording, STARTED);
        info!(session_id = %session_id, "Recording started");

        Ok(())
    }

    /// Stop recording and finalize the artifact.
    ///
    /// Returns `Ok(None)` without side effects unless currently recording.
    /// The microphone is released before this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns error if the buffered audio cannot be encoded; the session is
    /// then idle.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<Option<RecordingArtifact>> {
        let (session_id, started_at, capture) =
            match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Recording {
                    session_id,
                    started_at,
                    capture,
                    ..
                } => (session_id, started_at, capture),
                other => {
                    self.phase = other;
                    debug!(state = ?self.state(), "Stop ignored, not recording");
                    return Ok(None);
                }
            };

        let artifact = match capture.finish() {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to finalize recording");
                self.feedback.notify(Cue::Error, FINALIZE_FAILED);
                return Err(e);
            }
        };

        let handle = self.handles.create(&artifact);
        self.phase = Phase::Recorded {
            artifact: artifact.clone(),
            handle,
        };

        self.feedback.notify(Cue::Click, STOPPED);
        info!(
            session_id = %session_id,
            duration_ms = started_at.elapsed().as_millis(),
            bytes = artifact.len(),
            "Recording stopped"
        );

        Ok(Some(artifact))
    }

    /// Delete the finished recording and revoke its playback handle.
    ///
    /// Returns false without side effects unless recorded.
    #[instrument(skip(self))]
    pub fn discard(&mut self) -> bool {
        if !matches!(self.phase, Phase::Recorded { .. }) {
            debug!(state = ?self.state(), "Discard ignored, nothing recorded");
            return false;
        }

        self.player.stop();
        self.phase = Phase::Idle;
        self.elapsed.store(0, Ordering::Release);

        self.feedback.notify(Cue::Notification, DELETED);
        info!("Recording discarded");

        true
    }

    /// Hand the finished artifact to the caller.
    #[instrument(skip(self))]
    pub fn save(&self) -> Option<RecordingArtifact> {
        let artifact = self.artifact()?.clone();

        self.feedback.notify(Cue::Success, SAVED);
        info!(artifact = %artifact.id(), "Recording saved");

        Some(artifact)
    }

    /// Play the finished recording. State is unchanged.
    #[instrument(skip(self))]
    pub fn play(&self) -> bool {
        let Phase::Recorded { handle, .. } = &self.phase else {
            debug!(state = ?self.state(), "Play ignored, nothing recorded");
            return false;
        };

        let Some(artifact) = handle.resolve() else {
            warn!(handle = %handle.id(), "Playback handle already revoked");
            return false;
        };

        if let Err(e) = self.player.play(&artifact) {
            warn!(error = %e, "Playback failed");
        }
        self.feedback.notify(Cue::Click, PLAYING);

        true
    }

    /// Pause playback of the finished recording. State is unchanged.
    #[instrument(skip(self))]
    pub fn pause(&self) -> bool {
        if !matches!(self.phase, Phase::Recorded { .. }) {
            return false;
        }

        self.player.pause();
        true
    }

    /// Announce completion if the player finished the clip since the last poll.
    pub fn poll_playback(&self) -> bool {
        if matches!(self.phase, Phase::Recorded { .. }) && self.player.take_finished() {
            self.feedback.announce(PLAYBACK_COMPLETE);
            return true;
        }
        false
    }
}

impl<M: Microphone> Drop for RecordingSession<M> {
    fn drop(&mut self) {
        if !matches!(self.phase, Phase::Idle) {
            self.player.stop();
            debug!(state = ?self.state(), "Recording session torn down");
        }
    }
}

/// Render whole seconds as `MM:SS`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
