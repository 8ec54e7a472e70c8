//! Admin session gate.
//!
//! This is a plain credential comparison against configured values, not a
//! security boundary. A successful login writes two markers to storage; a session
//! is valid while the login time is inside the configured window.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tradedesk_store::{StorageKey, Store};

use crate::error::{AdminError, Result};
use crate::types::AdminConfig;

/// Marker value written to [`StorageKey::Authenticated`] on login.
const AUTHENTICATED: &str = "true";

/// Decides whether admin views may be shown.
pub trait Authorizer {
    /// Whether a valid admin session is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the session markers cannot be read.
    fn is_authorized(&self) -> Result<bool>;

    /// Fail with `AdminError::Unauthorized` unless a valid session is open.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` when no valid session exists.
    fn require_authorized(&self) -> Result<()> {
        if self.is_authorized()? {
            Ok(())
        } else {
            Err(AdminError::Unauthorized)
        }
    }
}

/// Configured admin credentials.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

impl Credentials {
    /// Create credentials. Either part may be unset, which refuses every login.
    #[must_use]
    pub const fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    fn accepts(&self, username: &str, password: &str) -> bool {
        self.username.as_deref() == Some(username) && self.password.as_deref() == Some(password)
    }
}

/// Session gate backed by the markers in storage.
pub struct SessionGate<S: Store> {
    store: Arc<S>,
    credentials: Credentials,
    ttl: Duration,
}

impl<S: Store> SessionGate<S> {
    /// Create a gate.
    #[must_use]
    pub const fn new(store: Arc<S>, credentials: Credentials, ttl: Duration) -> Self {
        Self {
            store,
            credentials,
            ttl,
        }
    }

    /// Create a gate from the admin configuration.
    #[must_use]
    pub fn from_config(store: Arc<S>, config: &AdminConfig) -> Self {
        let credentials =
            Credentials::new(config.admin_username.clone(), config.admin_password.clone());
        Self::new(store, credentials, config.session_ttl())
    }

    /// Open a session if the credentials match.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidCredentials` on mismatch; nothing is written.
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        self.login_at(username, password, Utc::now())
    }

    /// Like [`SessionGate::login`], with an explicit login time.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidCredentials` on mismatch; nothing is written.
    pub fn login_at(&self, username: &str, password: &str, now: DateTime<Utc>) -> Result<()> {
        if !self.credentials.accepts(username, password) {
            tracing::warn!(username, "Rejected admin login");
            return Err(AdminError::InvalidCredentials);
        }

        self.store.put(StorageKey::Authenticated, AUTHENTICATED)?;
        self.store
            .put(StorageKey::LoginTime, &now.timestamp_millis().to_string())?;
        tracing::info!(username, "Admin logged in");
        Ok(())
    }

    /// Close the session. Admin data is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the markers cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.clear_markers()?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Whether a session opened before `now` is still inside the window.
    ///
    /// Expired markers are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the markers cannot be read or removed.
    pub fn is_authorized_at(&self, now: DateTime<Utc>) -> Result<bool> {
        let flag = self.store.get(StorageKey::Authenticated)?;
        let login_time = self
            .store
            .get(StorageKey::LoginTime)?
            .and_then(|t| t.trim().parse::<i64>().ok());

        let (Some(flag), Some(login_millis)) = (flag, login_time) else {
            return Ok(false);
        };
        if flag != AUTHENTICATED {
            return Ok(false);
        }

        let elapsed_millis = now.timestamp_millis().saturating_sub(login_millis);
        let ttl_millis = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        if elapsed_millis < ttl_millis {
            return Ok(true);
        }

        tracing::warn!(elapsed_millis, "Admin session expired");
        self.clear_markers()?;
        Ok(false)
    }

    fn clear_markers(&self) -> Result<()> {
        self.store.delete(StorageKey::Authenticated)?;
        self.store.delete(StorageKey::LoginTime)?;
        Ok(())
    }
}

impl<S: Store> Authorizer for SessionGate<S> {
    fn is_authorized(&self) -> Result<bool> {
        self.is_authorized_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_store::MemoryStore;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn create_test_gate() -> (SessionGate<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let credentials = Credentials::new(Some("admin".into()), Some("hunter2".into()));
        (SessionGate::new(Arc::clone(&store), credentials, DAY), store)
    }

    #[test]
    fn login_writes_markers() {
        let (gate, store) = create_test_gate();
        let now = Utc::now();

        gate.login_at("admin", "hunter2", now).unwrap();
        assert_eq!(
            store.get(StorageKey::Authenticated).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            store.get(StorageKey::LoginTime).unwrap(),
            Some(now.timestamp_millis().to_string())
        );
        assert!(gate.is_authorized().unwrap());
    }

    #[test]
    fn wrong_credentials_rejected() {
        let (gate, store) = create_test_gate();
        let err = gate.login("admin", "wrong").unwrap_err();
        assert!(matches!(err, AdminError::InvalidCredentials));
        assert!(store.is_empty());
        assert!(matches!(
            gate.require_authorized(),
            Err(AdminError::Unauthorized)
        ));
    }

    #[test]
    fn unset_credentials_refuse_everything() {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(store, Credentials::default(), DAY);
        assert!(matches!(
            gate.login("", ""),
            Err(AdminError::InvalidCredentials)
        ));
    }

    #[test]
    fn session_expires_after_window() {
        let (gate, store) = create_test_gate();
        let login = Utc::now();
        gate.login_at("admin", "hunter2", login).unwrap();

        let almost = login + chrono::Duration::hours(23);
        assert!(gate.is_authorized_at(almost).unwrap());

        let expired = login + chrono::Duration::hours(24);
        assert!(!gate.is_authorized_at(expired).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn logout_clears_only_session_markers() {
        let (gate, store) = create_test_gate();
        store.put(StorageKey::Users, "[]").unwrap();
        gate.login("admin", "hunter2").unwrap();

        gate.logout().unwrap();
        assert!(!gate.is_authorized().unwrap());
        assert_eq!(store.get(StorageKey::Users).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn garbage_markers_are_not_a_session() {
        let (gate, store) = create_test_gate();
        store.put(StorageKey::Authenticated, "yes").unwrap();
        store.put(StorageKey::LoginTime, "soon").unwrap();
        assert!(!gate.is_authorized().unwrap());
    }
}
