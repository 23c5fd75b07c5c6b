use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use tracing::{debug, error};
use uuid::Uuid;

/// Mime type of artifacts produced by the cpal microphone.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// A finished recording: opaque audio bytes plus their mime type.
///
/// Clones share the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingArtifact {
    id: Uuid,
    data: Arc<[u8]>,
    mime_type: String,
    duration: Duration,
}

impl RecordingArtifact {
    /// Wrap an encoded payload.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            data: data.into(),
            mime_type: mime_type.into(),
            duration,
        }
    }

    /// Unique id of this artifact.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Encoded audio bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mime type of [`data`](Self::data).
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Length of the captured audio.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Registry of live playback handles, the analogue of object URLs.
///
/// Every handle holds its artifact alive in the registry until revoked.
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    entries: Arc<Mutex<HashMap<Uuid, RecordingArtifact>>>,
}

impl HandleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `artifact` and return the handle that keeps it alive.
    pub fn create(&self, artifact: &RecordingArtifact) -> ArtifactHandle {
        let id = Uuid::new_v4();
        self.lock().insert(id, artifact.clone());
        debug!(handle = %id, artifact = %artifact.id(), "Artifact handle created");
        ArtifactHandle {
            id,
            registry: self.clone(),
        }
    }

    /// Look up the artifact behind a handle id; `None` once revoked.
    pub fn resolve(&self, id: Uuid) -> Option<RecordingArtifact> {
        self.lock().get(&id).cloned()
    }

    /// Number of handles not yet revoked.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn revoke(&self, id: Uuid) {
        if self.lock().remove(&id).is_some() {
            debug!(handle = %id, "Artifact handle revoked");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, RecordingArtifact>> {
        self.entries.lock().unwrap_or_else(|e| {
            error!("Handle registry lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

/// Owned playback handle. Dropping it revokes the registry entry.
#[derive(Debug)]
pub struct ArtifactHandle {
    id: Uuid,
    registry: HandleRegistry,
}

impl ArtifactHandle {
    /// Handle id, resolvable through the registry until revoked.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Artifact behind the handle.
    pub fn resolve(&self) -> Option<RecordingArtifact> {
        self.registry.resolve(self.id)
    }
}

impl Drop for ArtifactHandle {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}
