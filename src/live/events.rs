use crate::api::{Notification, RoomParticipant};
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub const EVENT_ERROR_TOKEN: &str = "errorToken";
pub const EVENT_TOKEN_MISSING: &str = "errTokenMising";
pub const EVENT_PAYMENT_STATUS: &str = "paymentStatus";
pub const EVENT_NEW_NOTIFICATION: &str = "newNoti";
pub const EVENT_ROOM_USERS: &str = "listUser";
pub const EVENT_JOIN_ROOM: &str = "joinRoom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ErrorToken,
    TokenMissing,
    PaymentStatus,
    NewNotification,
    RoomMembers,
    ConnectionError,
    Connected,
    Closed,
    Other,
}

impl EventKind {
    /// Kinds the session dispatcher consumes.
    pub const SESSION: &'static [EventKind] = &[
        EventKind::ErrorToken,
        EventKind::TokenMissing,
        EventKind::PaymentStatus,
        EventKind::NewNotification,
        EventKind::ConnectionError,
        EventKind::Connected,
        EventKind::Closed,
    ];
}

/// A typed inbound event from the live channel.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    ErrorToken { code: Option<String>, message: String },
    TokenMissing(String),
    PaymentStatus(Value),
    NewNotification(Notification),
    RoomMembers(Vec<RoomParticipant>),
    ConnectionError(String),
    /// The server acknowledged the Socket.IO handshake.
    Connected,
    /// The channel is gone, either side hung up.
    Closed,
    Other { name: String, args: Vec<Value> },
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl LiveEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LiveEvent::ErrorToken { .. } => EventKind::ErrorToken,
            LiveEvent::TokenMissing(_) => EventKind::TokenMissing,
            LiveEvent::PaymentStatus(_) => EventKind::PaymentStatus,
            LiveEvent::NewNotification(_) => EventKind::NewNotification,
            LiveEvent::RoomMembers(_) => EventKind::RoomMembers,
            LiveEvent::ConnectionError(_) => EventKind::ConnectionError,
            LiveEvent::Connected => EventKind::Connected,
            LiveEvent::Closed => EventKind::Closed,
            LiveEvent::Other { .. } => EventKind::Other,
        }
    }

    /// Type a named server event. Payloads that do not fit the expected
    /// shape are kept as `Other` rather than dropped.
    pub fn from_wire(name: &str, args: Vec<Value>) -> Self {
        let first = args.first();
        match name {
            EVENT_ERROR_TOKEN => {
                let code = first
                    .and_then(|v| v.get("code"))
                    .map(|c| text_of(Some(c)))
                    .filter(|c| !c.is_empty());
                let message = first
                    .and_then(|v| v.get("message"))
                    .map(|m| text_of(Some(m)))
                    .unwrap_or_else(|| text_of(first));
                LiveEvent::ErrorToken { code, message }
            }
            EVENT_TOKEN_MISSING => LiveEvent::TokenMissing(text_of(first)),
            EVENT_PAYMENT_STATUS => {
                LiveEvent::PaymentStatus(first.cloned().unwrap_or(Value::Null))
            }
            EVENT_NEW_NOTIFICATION => {
                match first.cloned().map(serde_json::from_value::<Notification>) {
                    Some(Ok(notification)) => LiveEvent::NewNotification(notification),
                    _ => LiveEvent::Other {
                        name: name.to_string(),
                        args,
                    },
                }
            }
            EVENT_ROOM_USERS => {
                match first
                    .cloned()
                    .map(serde_json::from_value::<Vec<RoomParticipant>>)
                {
                    Some(Ok(members)) => LiveEvent::RoomMembers(members),
                    _ => LiveEvent::Other {
                        name: name.to_string(),
                        args,
                    },
                }
            }
            _ => LiveEvent::Other {
                name: name.to_string(),
                args,
            },
        }
    }
}

struct Subscriber {
    kinds: Vec<EventKind>,
    tx: UnboundedSender<LiveEvent>,
}

/// Fan-out of inbound events to per-kind subscribers.
///
/// Each `subscribe` call yields an independent stream; dropping the stream
/// unsubscribes it, and subscribing again starts a fresh one.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kinds: &[EventKind]) -> UnboundedReceiver<LiveEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.borrow_mut().push(Subscriber {
            kinds: kinds.to_vec(),
            tx,
        });
        rx
    }

    /// Deliver to every live subscriber of the event's kind. Returns how
    /// many received it.
    pub fn publish(&self, event: LiveEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        self.subscribers.borrow_mut().retain(|sub| {
            if sub.tx.is_closed() {
                return false;
            }
            if sub.kinds.contains(&kind) {
                if sub.tx.unbounded_send(event.clone()).is_err() {
                    return false;
                }
                delivered += 1;
            }
            true
        });
        delivered
    }

    /// End every stream. Subscribers see `None` after draining.
    pub fn close(&self) {
        for sub in self.subscribers.borrow_mut().drain(..) {
            sub.tx.close_channel();
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
