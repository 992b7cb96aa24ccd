use super::credentials::{CredentialStore, Credentials};
use crate::api::{ApiError, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Offline,
    Connecting,
    Connected,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshApplied {
    Replaced,
    Cleared,
    /// The token changed while the refresh was in flight.
    Stale,
}

/// Who is signed in, what they have been told, and whether the live
/// channel is up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    access_token: Option<String>,
    role: Option<String>,
    notifications: Vec<Notification>,
    connection: ConnectionStatus,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Session {
    pub fn restore(store: &dyn CredentialStore) -> Self {
        let mut session = Self::default();
        if let Some(saved) = store.load() {
            session.access_token = Some(saved.access_token);
            session.role = Some(saved.role);
        }
        session
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }

    /// Token and role together, when both are present.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::new(self.access_token.as_deref()?, self.role.as_deref()?)
    }

    pub fn sign_in(&mut self, access_token: &str, role: &str) {
        self.access_token = non_empty(access_token);
        self.role = non_empty(role);
    }

    /// Clear token and role in one step.
    pub fn sign_out(&mut self) {
        self.access_token = None;
        self.role = None;
        self.notifications.clear();
        self.connection = ConnectionStatus::Offline;
    }

    /// Fold a refresh result in. Any failure ends the session.
    pub fn apply_refresh(
        &mut self,
        requested_with: &str,
        outcome: Result<String, ApiError>,
    ) -> RefreshApplied {
        if self.access_token.as_deref() != Some(requested_with) {
            return RefreshApplied::Stale;
        }
        match outcome {
            Ok(fresh) if !fresh.is_empty() => {
                self.access_token = Some(fresh);
                RefreshApplied::Replaced
            }
            _ => {
                self.sign_out();
                RefreshApplied::Cleared
            }
        }
    }

    pub fn prepend_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    pub fn replace_notifications(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
    }

    pub fn set_connection(&mut self, status: ConnectionStatus) {
        self.connection = status;
    }
}

/// Write credentials when both are present, otherwise remove both.
pub fn persist(session: &Session, store: &mut dyn CredentialStore) {
    match session.credentials() {
        Some(credentials) => store.save(&credentials),
        None => store.clear(),
    }
}
