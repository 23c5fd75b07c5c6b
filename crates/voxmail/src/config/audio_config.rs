use crate::config::{default_cue_volume, default_cues_enabled};

use serde::{Deserialize, Serialize};

/// Audio cue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Play short tones alongside announcements.
    #[serde(default = "default_cues_enabled")]
    pub cues_enabled: bool,
    /// Cue gain, 0.0 to 1.0.
    #[serde(default = "default_cue_volume")]
    pub cue_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            cues_enabled: default_cues_enabled(),
            cue_volume: default_cue_volume(),
        }
    }
}
