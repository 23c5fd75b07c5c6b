use crate::{AppError, AppResult, FileIdentityStore};

use voxmail_core::{CoreError, IdentityStore, SessionHolder};

use std::{fs, path::PathBuf};

/// WHAT: Missing file loads as no record
/// WHY: First run starts signed out without an error
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_loading_then_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileIdentityStore::open(dir.path().join("identity.json")).unwrap();

    assert_eq!(store.load().unwrap(), None);
}

/// WHAT: Save then load returns the same blob, clear removes it
/// WHY: The record survives restarts until logout
#[test]
#[allow(clippy::unwrap_used)]
fn given_saved_blob_when_cleared_then_file_removed() {
    // Given: A saved record in a nested directory
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("identity.json");
    let mut store = FileIdentityStore::open(path.clone()).unwrap();
    store.save(r#"{"id":"1"}"#).unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"id":"1"}"#));

    // When: Clearing twice
    store.clear().unwrap();
    store.clear().unwrap();

    // Then: File gone, no error on the second clear
    assert!(!path.exists());
    assert_eq!(store.load().unwrap(), None);
}

/// WHAT: A corrupt file restores as signed out
/// WHY: Corrupt persisted state is never fatal
#[test]
#[allow(clippy::unwrap_used)]
fn given_corrupt_file_when_restoring_session_then_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("identity.json");
    fs::write(&path, "\u{0}garbage").unwrap();

    let holder = SessionHolder::restore(Box::new(FileIdentityStore::open(path).unwrap()));

    assert!(!holder.is_authenticated());
}

/// WHAT: A parent path that is a file fails to open as a core storage error
/// WHY: Startup reports an unusable identity location instead of failing later on save
#[test]
#[allow(clippy::unwrap_used)]
fn given_parent_is_a_file_when_opening_then_core_storage_error() {
    // Given: A regular file where the store's directory should be
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("state");
    fs::write(&blocker, "not a directory").unwrap();

    // When: Opening a store beneath it through the app error path
    let open = |path: PathBuf| -> AppResult<FileIdentityStore> {
        Ok(FileIdentityStore::open(path)?)
    };
    let result = open(blocker.join("identity.json"));

    // Then: The storage error surfaces wrapped in the core variant
    assert!(matches!(
        result,
        Err(AppError::Core {
            source: CoreError::StorageError { .. },
            ..
        })
    ));
}
