use crate::config::{default_face_scan_success_rate, default_login_delay_ms};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Simulated login behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Delay before a login attempt resolves, in milliseconds.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
    /// Probability that a face scan succeeds, 0.0 to 1.0.
    #[serde(default = "default_face_scan_success_rate")]
    pub face_scan_success_rate: f64,
}

impl AuthConfig {
    pub(crate) fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
            face_scan_success_rate: default_face_scan_success_rate(),
        }
    }
}
