use super::events::{EventBus, EventKind, LiveEvent};
use super::protocol::{decode_frame, encode_frame, EnginePacket, SocketPacket};
use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiveError {
    #[error("could not open live channel: {0}")]
    Open(String),
    #[error("live channel protocol error: {0}")]
    Protocol(String),
    #[error("live channel is not supported on this platform")]
    Unsupported,
}

/// What the transport should do after one inbound frame.
#[derive(Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub replies: Vec<String>,
    /// The server acknowledged the namespace connect.
    pub connected: bool,
    pub closed: bool,
}

/// Handle one text frame: answer handshakes and pings, and publish typed
/// events on the bus.
pub fn on_frame(text: &str, auth: &Value, bus: &EventBus) -> FrameOutcome {
    let mut outcome = FrameOutcome::default();
    let packet = match decode_frame(text) {
        Ok(packet) => packet,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring undecodable live frame");
            return outcome;
        }
    };

    match packet {
        EnginePacket::Open(_) => {
            outcome.replies.push(encode_frame(&EnginePacket::Message(
                SocketPacket::connect(auth.clone()),
            )));
        }
        EnginePacket::Ping(data) => {
            outcome.replies.push(encode_frame(&EnginePacket::Pong(data)));
        }
        EnginePacket::Close => {
            outcome.closed = true;
        }
        EnginePacket::Message(SocketPacket::Connect { .. }) => {
            tracing::info!("live channel connected");
            outcome.connected = true;
            bus.publish(LiveEvent::Connected);
        }
        EnginePacket::Message(SocketPacket::Event { name, args, .. }) => {
            let event = LiveEvent::from_wire(&name, args);
            if event.kind() == EventKind::Other {
                tracing::debug!(event = %name, "unhandled live event");
            }
            bus.publish(event);
        }
        EnginePacket::Message(SocketPacket::ConnectError { data, .. }) => {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| data.to_string());
            tracing::warn!(%message, "live channel refused connection");
            bus.publish(LiveEvent::ConnectionError(message));
            outcome.closed = true;
        }
        EnginePacket::Message(SocketPacket::Disconnect { .. }) => {
            outcome.closed = true;
        }
        EnginePacket::Message(SocketPacket::Ack { .. })
        | EnginePacket::Pong(_)
        | EnginePacket::Upgrade
        | EnginePacket::Noop => {}
    }
    outcome
}

/// Events emitted before the namespace connect is acknowledged wait here.
#[derive(Default)]
struct Outbox {
    connected: bool,
    pending: Vec<String>,
}

/// Cheap, cloneable access to an open connection: emit events, subscribe
/// to inbound kinds, or hang up.
#[derive(Clone)]
pub struct LiveHandle {
    outbound: UnboundedSender<String>,
    bus: EventBus,
    outbox: Rc<RefCell<Outbox>>,
}

impl PartialEq for LiveHandle {
    fn eq(&self, other: &Self) -> bool {
        self.outbound.same_receiver(&other.outbound)
    }
}

impl LiveHandle {
    pub fn new(outbound: UnboundedSender<String>, bus: EventBus) -> Self {
        Self {
            outbound,
            bus,
            outbox: Rc::default(),
        }
    }

    /// Run one inbound frame through the protocol. Handshake replies go out
    /// immediately; held events follow once the server confirms the connect.
    /// Returns true when the transport should stop.
    pub fn handle_frame(&self, text: &str, auth: &Value) -> bool {
        let outcome = on_frame(text, auth, &self.bus);
        for reply in outcome.replies {
            let _ = self.outbound.unbounded_send(reply);
        }
        if outcome.connected {
            let pending = {
                let mut outbox = self.outbox.borrow_mut();
                outbox.connected = true;
                std::mem::take(&mut outbox.pending)
            };
            for frame in pending {
                let _ = self.outbound.unbounded_send(frame);
            }
        }
        outcome.closed
    }

    pub fn subscribe(&self, kinds: &[EventKind]) -> UnboundedReceiver<LiveEvent> {
        self.bus.subscribe(kinds)
    }

    pub fn emit(&self, name: &str, payload: Value) -> Result<(), LiveError> {
        let frame = encode_frame(&EnginePacket::Message(SocketPacket::event(
            name,
            vec![payload],
        )));
        if self.outbound.is_closed() {
            return Err(LiveError::Protocol("channel already closed".into()));
        }
        let mut outbox = self.outbox.borrow_mut();
        if !outbox.connected {
            outbox.pending.push(frame);
            return Ok(());
        }
        self.outbound
            .unbounded_send(frame)
            .map_err(|_| LiveError::Protocol("channel already closed".into()))
    }

    pub fn is_open(&self) -> bool {
        !self.outbound.is_closed()
    }

    /// Send a Socket.IO disconnect and stop the transport.
    pub fn disconnect(&self) {
        if self.outbound.is_closed() {
            return;
        }
        let _ = self.outbound.unbounded_send(encode_frame(&EnginePacket::Message(
            SocketPacket::disconnect(),
        )));
        self.outbound.close_channel();
        self.outbox.borrow_mut().pending.clear();
        self.bus.publish(LiveEvent::Closed);
    }
}

/// One live connection. Dropping it disconnects.
pub struct LiveConnection {
    handle: LiveHandle,
}

impl LiveConnection {
    pub fn handle(&self) -> LiveHandle {
        self.handle.clone()
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn auth_payload(token: &str) -> Value {
        json!({ "accessToken": token })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn open(url: &str, token: &str) -> Result<Self, LiveError> {
        use futures_channel::mpsc::unbounded;
        use futures_util::{future, SinkExt, StreamExt};
        use gloo_net::websocket::{futures::WebSocket, Message};

        let socket = WebSocket::open(url).map_err(|e| LiveError::Open(e.to_string()))?;
        let (mut write, mut read) = socket.split();
        let (outbound, mut outbound_rx) = unbounded::<String>();
        let bus = EventBus::new();
        let handle = LiveHandle::new(outbound, bus.clone());
        let auth = Self::auth_payload(token);

        let reader_handle = handle.clone();
        let reader_bus = bus.clone();
        let reader = async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if reader_handle.handle_frame(&text, &auth) {
                            break;
                        }
                    }
                    Ok(Message::Bytes(_)) => {
                        tracing::debug!("ignoring binary live frame");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "live channel read failed");
                        reader_bus.publish(LiveEvent::ConnectionError(err.to_string()));
                        break;
                    }
                }
            }
        };

        let writer = async move {
            while let Some(frame) = outbound_rx.next().await {
                if write.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }
            let _ = write.close().await;
        };

        // The transport ends when either half does; closing the outbound
        // channel is enough to tear it down.
        wasm_bindgen_futures::spawn_local(async move {
            future::select(Box::pin(reader), Box::pin(writer)).await;
            bus.publish(LiveEvent::Closed);
            bus.close();
            tracing::debug!("live transport finished");
        });

        Ok(Self { handle })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(_url: &str, _token: &str) -> Result<Self, LiveError> {
        Err(LiveError::Unsupported)
    }
}

impl Drop for LiveConnection {
    fn drop(&mut self) {
        self.handle.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc::unbounded;

    fn auth() -> Value {
        LiveConnection::auth_payload("tok")
    }

    #[test]
    fn open_frame_triggers_authenticated_connect() {
        let bus = EventBus::new();
        let outcome = on_frame(r#"0{"sid":"s1","pingInterval":25000}"#, &auth(), &bus);
        assert_eq!(outcome.replies, vec![r#"40{"accessToken":"tok"}"#.to_string()]);
        assert!(!outcome.closed);
    }

    #[test]
    fn ping_is_answered() {
        let bus = EventBus::new();
        let outcome = on_frame("2", &auth(), &bus);
        assert_eq!(outcome.replies, vec!["3".to_string()]);
    }

    #[test]
    fn events_reach_subscribers() {
        let bus = EventBus::new();
        let mut stream = bus.subscribe(EventKind::SESSION);
        on_frame("40{\"sid\":\"x\"}", &auth(), &bus);
        on_frame(r#"42["errTokenMising","Token missing"]"#, &auth(), &bus);

        assert_eq!(stream.try_next().unwrap(), Some(LiveEvent::Connected));
        assert_eq!(
            stream.try_next().unwrap(),
            Some(LiveEvent::TokenMissing("Token missing".into()))
        );
    }

    #[test]
    fn connect_error_closes() {
        let bus = EventBus::new();
        let mut stream = bus.subscribe(EventKind::SESSION);
        let outcome = on_frame(r#"44{"message":"invalid token"}"#, &auth(), &bus);
        assert!(outcome.closed);
        assert_eq!(
            stream.try_next().unwrap(),
            Some(LiveEvent::ConnectionError("invalid token".into()))
        );
    }

    #[test]
    fn garbage_is_ignored() {
        let bus = EventBus::new();
        assert_eq!(on_frame("zzz", &auth(), &bus), FrameOutcome::default());
    }

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(Some(frame)) = rx.try_next() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn events_wait_for_the_namespace_connect() {
        let (tx, mut rx) = unbounded();
        let handle = LiveHandle::new(tx, EventBus::new());

        assert!(handle.is_open());
        handle
            .emit("joinRoom", json!({ "roomId": "lobby" }))
            .unwrap();
        assert!(drain(&mut rx).is_empty());

        assert!(!handle.handle_frame(r#"0{"sid":"s1"}"#, &auth()));
        assert_eq!(drain(&mut rx), vec![r#"40{"accessToken":"tok"}"#.to_string()]);

        assert!(!handle.handle_frame(r#"40{"sid":"n1"}"#, &auth()));
        assert_eq!(
            drain(&mut rx),
            vec![r#"42["joinRoom",{"roomId":"lobby"}]"#.to_string()]
        );

        handle.emit("ping", Value::Null).unwrap();
        assert_eq!(drain(&mut rx), vec![r#"42["ping",null]"#.to_string()]);
    }

    #[test]
    fn held_events_are_dropped_on_disconnect() {
        let (tx, mut rx) = unbounded();
        let handle = LiveHandle::new(tx, EventBus::new());
        handle.emit("joinRoom", json!({ "roomId": "r1" })).unwrap();
        handle.disconnect();
        assert_eq!(drain(&mut rx), vec!["41".to_string()]);
    }

    #[test]
    fn handle_emits_and_disconnects_once() {
        let (tx, mut rx) = unbounded();
        let bus = EventBus::new();
        let mut closed = bus.subscribe(&[EventKind::Closed]);
        let handle = LiveHandle::new(tx, bus);

        handle.handle_frame(r#"0{"sid":"s1"}"#, &auth());
        handle.handle_frame("40", &auth());
        assert_eq!(rx.try_next().unwrap(), Some(r#"40{"accessToken":"tok"}"#.to_string()));

        handle
            .emit("joinRoom", json!({ "roomId": "r1" }))
            .unwrap();
        handle.disconnect();
        handle.disconnect();

        assert_eq!(
            rx.try_next().unwrap(),
            Some(r#"42["joinRoom",{"roomId":"r1"}]"#.to_string())
        );
        assert_eq!(rx.try_next().unwrap(), Some("41".to_string()));
        assert_eq!(rx.try_next().unwrap(), None);
        assert!(!handle.is_open());
        assert!(handle.emit("x", Value::Null).is_err());
        assert_eq!(closed.try_next().unwrap(), Some(LiveEvent::Closed));
        assert!(closed.try_next().is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_report_unsupported() {
        assert!(matches!(
            LiveConnection::open("ws://localhost", "tok"),
            Err(LiveError::Unsupported)
        ));
    }
}
