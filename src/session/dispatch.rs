use super::store::{ConnectionStatus, RefreshApplied, Session};
use crate::api::{ApiError, Notification};
use crate::live::LiveEvent;

/// Every mutation of the session, funnelled through one writer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SignIn { access_token: String, role: String },
    SignOut,
    RefreshCompleted {
        requested_with: String,
        outcome: Result<String, ApiError>,
    },
    NotificationsLoaded {
        for_token: String,
        notifications: Vec<Notification>,
    },
    SetConnection(ConnectionStatus),
    Live(LiveEvent),
}

/// Side effects the writer performs after updating state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    Alert(String),
    Disconnect,
}

pub fn apply_session_command(session: &mut Session, command: SessionCommand) -> Vec<SessionEffect> {
    match command {
        SessionCommand::SignIn { access_token, role } => {
            session.sign_in(&access_token, &role);
            Vec::new()
        }
        SessionCommand::SignOut => {
            session.sign_out();
            Vec::new()
        }
        SessionCommand::RefreshCompleted {
            requested_with,
            outcome,
        } => {
            if let Err(err) = &outcome {
                tracing::error!(error = %err, "token refresh failed");
            }
            match session.apply_refresh(&requested_with, outcome) {
                RefreshApplied::Replaced => tracing::debug!("access token refreshed"),
                RefreshApplied::Cleared => tracing::info!("session ended after failed refresh"),
                RefreshApplied::Stale => tracing::debug!("dropping refresh for superseded token"),
            }
            Vec::new()
        }
        SessionCommand::NotificationsLoaded {
            for_token,
            notifications,
        } => {
            if session.access_token() == Some(for_token.as_str()) {
                session.replace_notifications(notifications);
            }
            Vec::new()
        }
        SessionCommand::SetConnection(status) => {
            session.set_connection(status);
            Vec::new()
        }
        SessionCommand::Live(event) => dispatch_live_event(session, event),
    }
}

/// The single consumer of session-relevant live events.
pub fn dispatch_live_event(session: &mut Session, event: LiveEvent) -> Vec<SessionEffect> {
    match event {
        LiveEvent::ErrorToken { code, message } => {
            tracing::warn!(code = code.as_deref().unwrap_or("-"), %message, "server rejected access token");
            session.set_connection(ConnectionStatus::Offline);
            vec![SessionEffect::Alert(message), SessionEffect::Disconnect]
        }
        LiveEvent::TokenMissing(message) => vec![SessionEffect::Alert(message)],
        LiveEvent::PaymentStatus(payload) => {
            tracing::info!(%payload, "payment status");
            Vec::new()
        }
        LiveEvent::NewNotification(notification) => {
            session.prepend_notification(notification);
            Vec::new()
        }
        LiveEvent::ConnectionError(message) => {
            tracing::warn!(%message, "live channel error");
            session.set_connection(ConnectionStatus::Offline);
            Vec::new()
        }
        LiveEvent::Connected => {
            session.set_connection(ConnectionStatus::Connected);
            Vec::new()
        }
        LiveEvent::Closed => {
            if session.connection() != ConnectionStatus::Unsupported {
                session.set_connection(ConnectionStatus::Offline);
            }
            Vec::new()
        }
        LiveEvent::RoomMembers(_) | LiveEvent::Other { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        let mut session = Session::default();
        session.sign_in("tok", "user");
        session
    }

    #[test]
    fn error_token_alerts_then_disconnects() {
        let mut s = session();
        s.set_connection(ConnectionStatus::Connected);
        let effects = dispatch_live_event(
            &mut s,
            LiveEvent::ErrorToken {
                code: Some("401".into()),
                message: "Invalid token".into(),
            },
        );
        assert_eq!(
            effects,
            vec![
                SessionEffect::Alert("Invalid token".into()),
                SessionEffect::Disconnect
            ]
        );
        assert_eq!(s.connection(), ConnectionStatus::Offline);
    }

    #[test]
    fn missing_token_only_alerts() {
        let mut s = session();
        let effects = dispatch_live_event(&mut s, LiveEvent::TokenMissing("no token".into()));
        assert_eq!(effects, vec![SessionEffect::Alert("no token".into())]);
        assert!(s.is_signed_in());
    }

    #[test]
    fn payment_status_has_no_effect() {
        let mut s = session();
        let before = s.clone();
        let effects =
            dispatch_live_event(&mut s, LiveEvent::PaymentStatus(json!({ "status": "paid" })));
        assert!(effects.is_empty());
        assert_eq!(s, before);
    }

    #[test]
    fn new_notification_goes_first() {
        let mut s = session();
        s.replace_notifications(vec![Notification {
            id: "a".into(),
            ..Default::default()
        }]);
        dispatch_live_event(
            &mut s,
            LiveEvent::NewNotification(Notification {
                id: "b".into(),
                ..Default::default()
            }),
        );
        assert_eq!(s.notifications()[0].id, "b");
        assert_eq!(s.notifications().len(), 2);
    }

    #[test]
    fn connection_status_follows_channel() {
        let mut s = session();
        dispatch_live_event(&mut s, LiveEvent::Connected);
        assert_eq!(s.connection(), ConnectionStatus::Connected);
        dispatch_live_event(&mut s, LiveEvent::Closed);
        assert_eq!(s.connection(), ConnectionStatus::Offline);
    }

    #[test]
    fn stale_notification_load_is_dropped() {
        let mut s = session();
        apply_session_command(
            &mut s,
            SessionCommand::NotificationsLoaded {
                for_token: "old".into(),
                notifications: vec![Notification::default()],
            },
        );
        assert!(s.notifications().is_empty());

        apply_session_command(
            &mut s,
            SessionCommand::NotificationsLoaded {
                for_token: "tok".into(),
                notifications: vec![Notification::default()],
            },
        );
        assert_eq!(s.notifications().len(), 1);
    }

    #[test]
    fn refresh_failure_command_signs_out() {
        let mut s = session();
        apply_session_command(
            &mut s,
            SessionCommand::RefreshCompleted {
                requested_with: "tok".into(),
                outcome: Err(ApiError::Network("down".into())),
            },
        );
        assert_eq!(s.access_token(), None);
        assert_eq!(s.role(), None);
    }
}
