use crate::{AppError, ProcessSpeaker, speech::find_program};

use std::{ffi::OsString, fs};

/// WHAT: Programs are found in PATH directories
/// WHY: Speech synthesis detection
#[test]
#[allow(clippy::unwrap_used)]
fn given_program_in_path_dir_when_finding_then_full_path() {
    // Given: A fake program in a temp directory listed on PATH
    let dir = tempfile::tempdir().unwrap();
    let program = dir.path().join("speakme");
    fs::write(&program, "").unwrap();
    let path = std::env::join_paths([dir.path()]).unwrap();

    // When / Then: Found by name, missing names are not
    assert_eq!(find_program("speakme", &path), Some(program));
    assert_eq!(find_program("nope", &path), None);
}

/// WHAT: Names with a separator are checked as paths
/// WHY: speech_command may be an absolute path
#[test]
#[allow(clippy::unwrap_used)]
fn given_absolute_path_when_finding_then_checked_directly() {
    let dir = tempfile::tempdir().unwrap();
    let program = dir.path().join("tts");
    fs::write(&program, "").unwrap();
    let empty = OsString::new();

    let name = program.to_str().unwrap();
    assert_eq!(find_program(name, &empty), Some(program.clone()));
    assert_eq!(find_program(&format!("{}-missing", name), &empty), None);
}

/// WHAT: A configured command that does not exist is a speech error
/// WHY: Falls back to text-only announcements
#[test]
fn given_missing_configured_command_when_discovering_then_speech_error() {
    let result = ProcessSpeaker::discover(Some("/definitely/not/a/tts-program"));

    assert!(matches!(result, Err(AppError::SpeechError { .. })));
}
