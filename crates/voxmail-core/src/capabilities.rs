/// Platform capabilities negotiated once at startup.
///
/// Services consult this before entering any state that needs the
/// capability, so a missing platform feature degrades into an announcement
/// instead of a failure deep inside a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Text-to-speech is available for announcements.
    pub has_speech_synthesis: bool,
    /// Continuous speech recognition is available for voice commands.
    pub has_speech_recognition: bool,
    /// A microphone can be opened for recording.
    pub has_microphone: bool,
}

impl Capabilities {
    /// Every capability present.
    pub fn all() -> Self {
        Self {
            has_speech_synthesis: true,
            has_speech_recognition: true,
            has_microphone: true,
        }
    }

    /// No capability present.
    pub fn none() -> Self {
        Self::default()
    }
}
