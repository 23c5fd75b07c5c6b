use crate::config::{default_locale, default_recognition_enabled};

use serde::{Deserialize, Serialize};

/// Speech recognition and synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Recognition locale tag.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Whether voice commands may be activated.
    #[serde(default = "default_recognition_enabled")]
    pub recognition_enabled: bool,
    /// Text-to-speech program (None = first of espeak-ng, espeak, say on PATH).
    #[serde(default)]
    pub speech_command: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            recognition_enabled: default_recognition_enabled(),
            speech_command: None,
        }
    }
}
