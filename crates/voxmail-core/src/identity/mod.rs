//! Simulated signed-in identity and its durable record.

mod policy;

pub use policy::{AuthPolicy, DemoAuthPolicy, LoginMethod};

use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

/// Single-key durable storage for the serialized identity.
pub trait IdentityStore {
    /// Read the stored blob, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be read.
    fn load(&self) -> CoreResult<Option<String>>;

    /// Replace the stored blob.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn save(&mut self, blob: &str) -> CoreResult<()>;

    /// Remove the stored blob.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn clear(&mut self) -> CoreResult<()>;
}

/// Identity store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    blob: Option<String>,
}

impl MemoryIdentityStore {
    /// Store pre-seeded with `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> CoreResult<Option<String>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> CoreResult<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> CoreResult<()> {
        self.blob = None;
        Ok(())
    }
}

/// Holds the signed-in identity.
///
/// A present identity is what "authenticated" means; there is no separate flag.
pub struct SessionHolder {
    store: Box<dyn IdentityStore>,
    identity: Option<Identity>,
    loading: bool,
    last_error: Option<String>,
}

impl SessionHolder {
    /// Rehydrate from `store`. Unreadable or corrupt records mean signed out.
    #[instrument(skip(store))]
    pub fn restore(store: Box<dyn IdentityStore>) -> Self {
        let identity = match store.load() {
            Ok(Some(blob)) => match parse_identity(&blob) {
                Ok(identity) => {
                    info!(user_id = %identity.id, "Identity restored");
                    Some(identity)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring stored identity");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Identity store unreadable, starting signed out");
                None
            }
        };

        Self {
            store,
            identity,
            loading: false,
            last_error: None,
        }
    }

    /// The signed-in identity.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether a login attempt is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed login attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Authenticate through `policy` and persist the resulting identity.
    ///
    /// Concurrent attempts are not guarded; the view layer starts one at a time.
    ///
    /// # Errors
    ///
    /// Returns the policy's rejection. The holder stays signed out.
    #[instrument(skip(self, method, policy))]
    pub async fn login<P: AuthPolicy>(
        &mut self,
        method: LoginMethod,
        policy: &P,
    ) -> CoreResult<Identity> {
        self.loading = true;
        self.last_error = None;

        let outcome = policy.authenticate(&method).await;
        self.loading = false;

        let identity = match outcome {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Login rejected");
                self.last_error = Some("Authentication failed. Please try again.".to_string());
                return Err(e);
            }
        };

        match serde_json::to_string(&identity) {
            Ok(blob) => {
                if let Err(e) = self.store.save(&blob) {
                    warn!(error = %e, "Identity not persisted");
                }
            }
            Err(e) => warn!(error = %e, "Identity not serializable"),
        }

        info!(user_id = %identity.id, method = method.label(), "Logged in");
        self.identity = Some(identity.clone());

        Ok(identity)
    }

    /// Drop the identity from memory and storage.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!(user_id = %identity.id, "Logged out");
        }

        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Stored identity not cleared");
        }
    }
}

#[track_caller]
fn parse_identity(blob: &str) -> CoreResult<Identity> {
    serde_json::from_str(blob).map_err(|e| CoreError::PersistedStateCorrupt {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
