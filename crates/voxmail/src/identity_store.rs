use voxmail_core::{CoreError, CoreResult, IdentityStore};

use std::{
    fs,
    io::{ErrorKind, Write},
    panic::Location,
    path::PathBuf,
};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Identity record kept as a JSON file.
///
/// Writes go through a temp file and a rename so a crash never leaves a
/// half-written record.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store backed by `path`, creating its parent directory.
    ///
    /// Nothing is read until [`load`](IdentityStore::load).
    ///
    /// # Errors
    ///
    /// `StorageError` if the parent directory cannot be created.
    #[track_caller]
    pub fn open(path: PathBuf) -> CoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", &e))?;
        }
        Ok(Self { path })
    }
}

impl IdentityStore for FileIdentityStore {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&self) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &e)),
        }
    }

    #[instrument(skip(self, blob), fields(path = ?self.path))]
    fn save(&mut self, blob: &str) -> CoreResult<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| storage_error("create temp file for", &e))?;
        temp_file
            .write_all(blob.as_bytes())
            .map_err(|e| storage_error("write", &e))?;
        temp_file
            .sync_all()
            .map_err(|e| storage_error("sync", &e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| storage_error("rename", &e))?;

        debug!("Identity saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = ?self.path))]
    fn clear(&mut self) -> CoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Identity removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &e)),
        }
    }
}

#[track_caller]
fn storage_error(action: &str, e: &std::io::Error) -> CoreError {
    CoreError::StorageError {
        reason: format!("Failed to {} identity file: {}", action, e),
        location: ErrorLocation::from(Location::caller()),
    }
}
