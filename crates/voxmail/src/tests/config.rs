use crate::config::{
    Config, DEFAULT_CUE_VOLUME, DEFAULT_FACE_SCAN_SUCCESS_RATE, DEFAULT_LOG_FILTER,
    DEFAULT_LOGIN_DELAY_MS,
};

use std::{fs, path::PathBuf, time::Duration};

/// WHAT: Missing sections and fields take defaults
/// WHY: Old or hand-written config files keep working
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_file_when_loading_then_defaults_filled() {
    // Given: Config with only a locale
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[voice]\nlocale = \"en-GB\"\n").unwrap();

    // When: Loading
    let config = Config::load_from(&path).unwrap();

    // Then: Locale kept, everything else default
    assert_eq!(config.voice.locale, "en-GB");
    assert!(config.voice.recognition_enabled);
    assert_eq!(config.auth.login_delay_ms, DEFAULT_LOGIN_DELAY_MS);
    assert_eq!(config.auth.login_delay(), Duration::from_millis(1500));
    assert!(
        (config.auth.face_scan_success_rate - DEFAULT_FACE_SCAN_SUCCESS_RATE).abs() < f64::EPSILON
    );
    assert!((config.audio.cue_volume - DEFAULT_CUE_VOLUME).abs() < f32::EPSILON);
    assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    assert!(config.storage.identity_path.is_none());
}

/// WHAT: Saved config loads back identically
/// WHY: Atomic save must produce a readable file and no temp leftovers
#[test]
#[allow(clippy::unwrap_used)]
fn given_custom_config_when_saved_then_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.audio.cues_enabled = false;
    config.storage.identity_path = Some(PathBuf::from("/tmp/who.json"));

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    assert!(!loaded.audio.cues_enabled);
    assert_eq!(loaded.storage.identity_path, config.storage.identity_path);
    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(loaded.identity_path().unwrap(), PathBuf::from("/tmp/who.json"));
}

/// WHAT: Out-of-range success rate is rejected
/// WHY: Probabilities outside 0..=1 are meaningless
#[test]
#[allow(clippy::unwrap_used)]
fn given_rate_above_one_when_loading_then_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[auth]\nface_scan_success_rate = 1.5\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// WHAT: Malformed TOML is a config error, not a panic
/// WHY: Users edit this file by hand
#[test]
#[allow(clippy::unwrap_used)]
fn given_malformed_toml_when_loading_then_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[voice\nlocale = ").unwrap();

    assert!(Config::load_from(&path).is_err());
}
