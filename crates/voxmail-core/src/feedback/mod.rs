//! Audio cues and spoken announcements.

use crate::{Capabilities, CoreResult};

use std::{fmt, rc::Rc};

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Short non-speech sounds signalling an event outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
    /// Something changed that the user should notice.
    Notification,
    /// A control was activated.
    Click,
    /// Recording began.
    Recording,
    /// The user signed in.
    Login,
    /// The user signed out.
    Logout,
}

impl Cue {
    /// Every cue in catalog order.
    pub const ALL: [Cue; 7] = [
        Cue::Success,
        Cue::Error,
        Cue::Notification,
        Cue::Click,
        Cue::Recording,
        Cue::Login,
        Cue::Logout,
    ];

    /// Position of the cue in [`Cue::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Catalog name of the cue.
    pub fn name(self) -> &'static str {
        match self {
            Cue::Success => "success",
            Cue::Error => "error",
            Cue::Notification => "notification",
            Cue::Click => "click",
            Cue::Recording => "recording",
            Cue::Login => "login",
            Cue::Logout => "logout",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plays catalog cues. Replaying a cue that is still sounding restarts it.
pub trait CuePlayer {
    /// Start `cue` from position zero.
    fn play(&self, cue: Cue) -> CoreResult<()>;
}

/// Text-to-speech collaborator.
pub trait Speaker {
    /// Silence whatever is currently being spoken.
    fn cancel(&self);

    /// Speak `text`.
    fn speak(&self, text: &str) -> CoreResult<()>;
}

/// Feedback façade shared by every service.
///
/// Cheap to clone: collaborators are reference counted, and the process
/// is single-threaded so they need not be `Send`.
#[derive(Clone)]
pub struct AudioFeedback {
    cues: Rc<dyn CuePlayer>,
    speaker: Rc<dyn Speaker>,
    capabilities: Capabilities,
    cues_enabled: bool,
    live_region: Option<mpsc::UnboundedSender<String>>,
}

impl AudioFeedback {
    /// Create a façade over the given collaborators.
    pub fn new(
        cues: Rc<dyn CuePlayer>,
        speaker: Rc<dyn Speaker>,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            cues,
            speaker,
            capabilities,
            cues_enabled: true,
            live_region: None,
        }
    }

    /// Mirror every announcement into `tx`, whether or not speech is available.
    pub fn with_live_region(mut self, tx: mpsc::UnboundedSender<String>) -> Self {
        self.live_region = Some(tx);
        self
    }

    /// Enable or disable cue playback.
    pub fn with_cues_enabled(mut self, enabled: bool) -> Self {
        self.cues_enabled = enabled;
        self
    }

    /// Fire-and-forget cue playback. Failures are logged, never returned.
    pub fn play_cue(&self, cue: Cue) {
        if !self.cues_enabled {
            return;
        }

        if let Err(e) = self.cues.play(cue) {
            warn!(cue = %cue, error = %e, "Cue playback failed");
        }
    }

    /// Preempt any in-flight announcement and speak `text`.
    ///
    /// Silently does nothing audible when speech synthesis is unavailable.
    pub fn announce(&self, text: &str) {
        if let Some(tx) = &self.live_region {
            // Receiver gone means nobody renders the live region any more.
            let _ = tx.send(text.to_string());
        }

        if !self.capabilities.has_speech_synthesis {
            debug!(text, "Speech synthesis unavailable, announcement skipped");
            return;
        }

        self.speaker.cancel();
        if let Err(e) = self.speaker.speak(text) {
            warn!(error = %e, "Announcement failed");
        }
    }

    /// Cue followed by an announcement, the pairing every transition uses.
    pub fn notify(&self, cue: Cue, text: &str) {
        self.play_cue(cue);
        self.announce(text);
    }

    /// Capabilities the façade was built with.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}
