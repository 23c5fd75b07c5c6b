use crate::config::Config;

use voxmail_core::{Capabilities, CpalMicrophone};

use tracing::info;

/// Probe the platform once at startup.
///
/// `has_speech` comes from [`ProcessSpeaker::discover`](crate::ProcessSpeaker::discover)
/// so the program lookup happens only once.
pub(crate) fn negotiate(config: &Config, has_speech: bool) -> Capabilities {
    let capabilities = Capabilities {
        has_speech_synthesis: has_speech,
        has_speech_recognition: config.voice.recognition_enabled,
        has_microphone: CpalMicrophone::is_available(),
    };

    info!(
        speech = capabilities.has_speech_synthesis,
        recognition = capabilities.has_speech_recognition,
        microphone = capabilities.has_microphone,
        "Capabilities negotiated"
    );

    capabilities
}
