mod audio_config;
mod auth_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod storage_config;
mod voice_config;

pub(crate) use {
    audio_config::AudioConfig, auth_config::AuthConfig, config::Config,
    logging_config::LoggingConfig, storage_config::StorageConfig, voice_config::VoiceConfig,
};

pub(crate) const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;
pub(crate) const DEFAULT_FACE_SCAN_SUCCESS_RATE: f64 = 0.8;
pub(crate) const DEFAULT_RECOGNITION_ENABLED: bool = true;
pub(crate) const DEFAULT_CUES_ENABLED: bool = true;
pub(crate) const DEFAULT_CUE_VOLUME: f32 = 0.3;
pub(crate) const DEFAULT_LOG_FILTER: &str = "voxmail=info,voxmail_core=info";

pub(crate) fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

pub(crate) fn default_face_scan_success_rate() -> f64 {
    DEFAULT_FACE_SCAN_SUCCESS_RATE
}

pub(crate) fn default_locale() -> String {
    voxmail_core::DEFAULT_LOCALE.to_string()
}

pub(crate) fn default_recognition_enabled() -> bool {
    DEFAULT_RECOGNITION_ENABLED
}

pub(crate) fn default_cues_enabled() -> bool {
    DEFAULT_CUES_ENABLED
}

pub(crate) fn default_cue_volume() -> f32 {
    DEFAULT_CUE_VOLUME
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
