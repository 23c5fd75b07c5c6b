use crate::{AppError, AppResult};

use voxmail_core::{CoreError, CoreResult, Speaker};

use std::{
    cell::RefCell,
    env,
    ffi::OsString,
    panic::Location,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Programs tried, in order, when no speech command is configured.
pub(crate) const SPEECH_PROGRAMS: &[&str] = &["espeak-ng", "espeak", "say"];

/// Text-to-speech through an external program that takes the text as its
/// last argument.
///
/// At most one utterance is in flight: `cancel` kills the running child.
#[derive(Debug)]
pub struct ProcessSpeaker {
    program: PathBuf,
    child: RefCell<Option<Child>>,
}

impl ProcessSpeaker {
    /// Resolve `command`, or the first of [`SPEECH_PROGRAMS`] on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if no candidate program exists.
    #[track_caller]
    #[instrument]
    pub fn discover(command: Option<&str>) -> AppResult<Self> {
        let path = env::var_os("PATH").unwrap_or_default();
        let program = match command {
            Some(command) => find_program(command, &path),
            None => SPEECH_PROGRAMS
                .iter()
                .find_map(|name| find_program(name, &path)),
        };

        let program = program.ok_or_else(|| AppError::SpeechError {
            reason: match command {
                Some(command) => format!("Speech command not found: {}", command),
                None => format!("None of {:?} found on PATH", SPEECH_PROGRAMS),
            },
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(program = ?program, "Speech synthesis available");

        Ok(Self {
            program,
            child: RefCell::new(None),
        })
    }
}

impl Speaker for ProcessSpeaker {
    fn cancel(&self) {
        if let Some(mut child) = self.child.borrow_mut().take() {
            // Already exited is fine.
            let _ = child.kill();
            if let Err(e) = child.wait() {
                warn!(error = %e, "Failed to reap speech process");
            }
        }
    }

    fn speak(&self, text: &str) -> CoreResult<()> {
        let child = Command::new(&self.program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CoreError::SpeechSynthesis {
                reason: format!("Failed to spawn {:?}: {}", self.program, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(pid = child.id(), "Speaking");
        *self.child.borrow_mut() = Some(child);

        Ok(())
    }
}

impl Drop for ProcessSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Speaker for systems without speech synthesis. Announcements still reach
/// the live region.
#[derive(Debug, Default)]
pub struct MuteSpeaker;

impl Speaker for MuteSpeaker {
    fn cancel(&self) {}

    fn speak(&self, _text: &str) -> CoreResult<()> {
        Ok(())
    }
}

/// Resolve `name` against `path_var` the way a shell would.
///
/// Names containing a path separator are taken as paths.
pub(crate) fn find_program(name: &str, path_var: &OsString) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|p| p.is_file())
}
