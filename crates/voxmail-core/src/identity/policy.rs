use crate::{CoreError, CoreResult, identity::Identity};

use std::{fmt, future::Future, panic::Location, time::Duration};

use error_location::ErrorLocation;
use rand::Rng;
use tracing::debug;

/// How the user is trying to sign in.
#[derive(Clone, PartialEq, Eq)]
pub enum LoginMethod {
    /// Camera-based face scan.
    FaceScan,
    /// Email and password form.
    Credentials {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
}

impl LoginMethod {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            LoginMethod::FaceScan => "face_scan",
            LoginMethod::Credentials { .. } => "credentials",
        }
    }
}

impl fmt::Debug for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginMethod::FaceScan => f.write_str("FaceScan"),
            LoginMethod::Credentials { email, .. } => f
                .debug_struct("Credentials")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Decides whether a login attempt succeeds.
pub trait AuthPolicy {
    /// Resolve `method` to an identity, or reject it.
    fn authenticate(&self, method: &LoginMethod) -> impl Future<Output = CoreResult<Identity>>;
}

/// Placeholder policy: fixed delay, fixed identity, no real verification.
///
/// Credentials are accepted whenever both fields are filled in. A face scan
/// succeeds with probability `face_scan_success_rate`.
#[derive(Debug, Clone)]
pub struct DemoAuthPolicy {
    delay: Duration,
    face_scan_success_rate: f64,
}

impl DemoAuthPolicy {
    /// Policy waiting `delay` per attempt.
    pub fn new(delay: Duration, face_scan_success_rate: f64) -> Self {
        Self {
            delay,
            face_scan_success_rate: face_scan_success_rate.clamp(0.0, 1.0),
        }
    }

    /// The identity every successful attempt produces.
    pub fn demo_identity() -> Identity {
        Identity {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
        }
    }
}

impl Default for DemoAuthPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), 0.8)
    }
}

impl AuthPolicy for DemoAuthPolicy {
    async fn authenticate(&self, method: &LoginMethod) -> CoreResult<Identity> {
        tokio::time::sleep(self.delay).await;

        let accepted = match method {
            LoginMethod::FaceScan => rand::thread_rng().gen_bool(self.face_scan_success_rate),
            LoginMethod::Credentials { email, password } => {
                !email.trim().is_empty() && !password.is_empty()
            }
        };

        debug!(method = method.label(), accepted, "Authentication decided");

        if accepted {
            Ok(Self::demo_identity())
        } else {
            Err(CoreError::LoginFailed {
                reason: match method {
                    LoginMethod::FaceScan => "Face not recognized".to_string(),
                    LoginMethod::Credentials { .. } => "Email and password required".to_string(),
                },
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
