//! Wires the session store into the component tree: one writer task, the
//! 30 s refresh timer and the live channel, all scoped to the token.

use super::credentials::platform_store;
use super::dispatch::{apply_session_command, SessionCommand, SessionEffect};
use super::store::{persist, ConnectionStatus, Session};
use crate::api::{ApiClient, Notification};
use crate::config::{AppConfig, TOKEN_REFRESH_INTERVAL};
use crate::lifecycle::{ScopedTask, TokenScoped};
use crate::live::{EventKind, LiveConnection, LiveError, LiveHandle};
use crate::utils::{alert_user, delay_ms};
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedSender};
use futures_util::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;

/// The open live channel, if any. Rooms subscribe through this.
#[derive(Clone, Copy, PartialEq)]
pub struct LiveSignal(pub Signal<Option<LiveHandle>>);

/// Read access to the session plus the one channel that may change it.
#[derive(Clone)]
pub struct SessionHandle {
    state: Signal<Session>,
    tx: UnboundedSender<SessionCommand>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl SessionHandle {
    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token().map(str::to_string)
    }

    /// Token without subscribing the caller to session changes. Loads keyed
    /// on something else read the token this way.
    pub fn peek_access_token(&self) -> Option<String> {
        self.state.peek().access_token().map(str::to_string)
    }

    pub fn role(&self) -> Option<String> {
        self.state.read().role().map(str::to_string)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().notifications().to_vec()
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.state.read().connection()
    }

    pub fn send(&self, command: SessionCommand) {
        if self.tx.unbounded_send(command).is_err() {
            tracing::debug!("session writer is gone, command dropped");
        }
    }

    pub fn sign_in(&self, access_token: &str, role: &str) {
        self.send(SessionCommand::SignIn {
            access_token: access_token.to_string(),
            role: role.to_string(),
        });
    }

    pub fn sign_out(&self) {
        self.send(SessionCommand::SignOut);
    }
}

/// Everything opened for one token. Field order is drop order.
struct TokenResources {
    _pump: Option<ScopedTask>,
    _refresh: ScopedTask,
    _notifications: ScopedTask,
    _connection: Option<LiveConnection>,
}

async fn refresh_loop(api: ApiClient, token: String, session: SessionHandle) {
    loop {
        delay_ms(TOKEN_REFRESH_INTERVAL.as_millis() as u64).await;
        let outcome = api.refresh_token(&token).await;
        let failed = outcome.is_err();
        session.send(SessionCommand::RefreshCompleted {
            requested_with: token.clone(),
            outcome,
        });
        if failed {
            break;
        }
    }
}

fn open_token_resources(
    token: &str,
    config: &AppConfig,
    api: &ApiClient,
    session: &SessionHandle,
    mut live: Signal<Option<LiveHandle>>,
) -> TokenResources {
    let notifications = {
        let api = api.clone();
        let session = session.clone();
        let token = token.to_string();
        ScopedTask::spawn(async move {
            match api.fetch_notifications(&token).await {
                Ok(notifications) => session.send(SessionCommand::NotificationsLoaded {
                    for_token: token,
                    notifications,
                }),
                Err(err) => tracing::warn!(error = %err, "could not load notifications"),
            }
        })
    };

    let refresh = ScopedTask::spawn(refresh_loop(
        api.clone(),
        token.to_string(),
        session.clone(),
    ));

    let (connection, pump) = match LiveConnection::open(&config.live_url(), token) {
        Ok(connection) => {
            let handle = connection.handle();
            let mut events = handle.subscribe(EventKind::SESSION);
            let pump_session = session.clone();
            let pump = ScopedTask::spawn(async move {
                while let Some(event) = events.next().await {
                    pump_session.send(SessionCommand::Live(event));
                }
            });
            session.send(SessionCommand::SetConnection(ConnectionStatus::Connecting));
            live.set(Some(handle));
            (Some(connection), Some(pump))
        }
        Err(LiveError::Unsupported) => {
            tracing::info!("live channel unavailable on this platform");
            session.send(SessionCommand::SetConnection(ConnectionStatus::Unsupported));
            live.set(None);
            (None, None)
        }
        Err(err) => {
            tracing::error!(error = %err, "could not open live channel");
            session.send(SessionCommand::SetConnection(ConnectionStatus::Offline));
            live.set(None);
            (None, None)
        }
    };

    TokenResources {
        _pump: pump,
        _refresh: refresh,
        _notifications: notifications,
        _connection: connection,
    }
}

/// Install the session runtime in the calling component.
pub fn use_session_runtime(config: AppConfig, api: ApiClient) -> (SessionHandle, LiveSignal) {
    let state = use_signal(|| Session::restore(platform_store().as_ref()));
    let live = use_signal(|| None::<LiveHandle>);

    let (handle, _writer) = use_hook(|| {
        let (tx, mut rx) = unbounded::<SessionCommand>();
        let mut state = state;
        let writer = ScopedTask::spawn(async move {
            let mut store = platform_store();
            persist(&state.peek(), store.as_mut());

            while let Some(command) = rx.next().await {
                let before = state.peek().credentials();
                let effects = apply_session_command(&mut *state.write(), command);
                if state.peek().credentials() != before {
                    persist(&state.peek(), store.as_mut());
                }
                for effect in effects {
                    match effect {
                        SessionEffect::Alert(message) => alert_user(&message),
                        SessionEffect::Disconnect => {
                            if let Some(live) = live.peek().as_ref() {
                                live.disconnect();
                            }
                        }
                    }
                }
            }
        });
        (SessionHandle { state, tx }, Rc::new(writer))
    });

    let lifecycle = use_hook(|| Rc::new(RefCell::new(TokenScoped::<TokenResources>::new())));

    {
        let lifecycle = lifecycle.clone();
        let session = handle.clone();
        let mut live = live;
        use_effect(move || {
            let token = state.read().access_token().map(str::to_string);
            let mut slot = lifecycle.borrow_mut();
            let changed = slot.retarget(token.as_deref(), |token| {
                Some(open_token_resources(token, &config, &api, &session, live))
            });
            if changed && slot.token().is_none() {
                live.set(None);
                session.send(SessionCommand::SetConnection(ConnectionStatus::Offline));
            }
        });
    }

    use_drop(move || {
        lifecycle.borrow_mut().release();
    });

    (handle, LiveSignal(live))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::{NoOpMutations, VirtualDom};
    use std::cell::Cell;
    use std::time::Duration;

    thread_local! {
        static LOADS: Cell<u32> = const { Cell::new(0) };
        static RENDERS: Cell<u32> = const { Cell::new(0) };
    }

    fn playlist_like() -> Element {
        let mut state = use_signal(Session::default);
        let handle = use_hook(|| {
            let (tx, _rx) = unbounded();
            SessionHandle { state, tx }
        });
        let id = "p1".to_string();

        let _load = use_resource(use_reactive!(|id| {
            let token = handle.peek_access_token();
            LOADS.with(|loads| loads.set(loads.get() + 1));
            async move {
                let _ = (id, token);
            }
        }));

        use_hook(|| {
            spawn(async move {
                state.write().set_connection(ConnectionStatus::Connected);
            })
        });

        RENDERS.with(|renders| renders.set(renders.get() + 1));
        let status = state.read().connection();
        rsx! { "{status:?}" }
    }

    #[tokio::test]
    async fn session_writes_do_not_rerun_keyed_loads() {
        let mut dom = VirtualDom::new(playlist_like);
        dom.rebuild_in_place();
        for _ in 0..5 {
            let _ = tokio::time::timeout(Duration::from_millis(20), dom.wait_for_work()).await;
            dom.render_immediate(&mut NoOpMutations);
        }

        assert!(RENDERS.with(Cell::get) >= 2, "the session write should re-render");
        assert_eq!(LOADS.with(Cell::get), 1);
    }
}
