use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where durable state lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Identity record path (None = `identity.json` in the data directory).
    #[serde(default)]
    pub identity_path: Option<PathBuf>,
}
