use crate::components::{Icon, ListUser};
use crate::lifecycle::ScopedTask;
use crate::live::{EventKind, LiveEvent, EVENT_JOIN_ROOM};
use crate::room::RoomMembership;
use crate::session::{ConnectionStatus, LiveSignal, SessionHandle};
use dioxus::prelude::*;
use futures_util::StreamExt;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

/// A listen-together room. Membership is whatever the server last pushed.
#[component]
pub fn Room(id: String) -> Element {
    let live = use_context::<LiveSignal>().0;
    let session = use_context::<SessionHandle>();
    let mut membership = use_signal(RoomMembership::default);
    let subscription = use_hook(|| Rc::new(RefCell::new(None::<ScopedTask>)));

    use_effect(use_reactive!(|id| {
        // Re-runs per connection and per room.
        subscription.borrow_mut().take();
        membership.set(RoomMembership::default());

        let Some(handle) = live().filter(|handle| handle.is_open()) else {
            return;
        };
        let mut events = handle.subscribe(&[EventKind::RoomMembers]);
        if let Err(err) = handle.emit(EVENT_JOIN_ROOM, json!({ "roomId": id })) {
            tracing::warn!(error = %err, room = %id, "could not join room");
            return;
        }
        tracing::debug!(room = %id, "joined room");

        let task = ScopedTask::spawn(async move {
            while let Some(event) = events.next().await {
                if let LiveEvent::RoomMembers(participants) = event {
                    membership.write().replace(participants);
                }
            }
        });
        *subscription.borrow_mut() = Some(task);
    }));

    let rows = membership.read().rows();
    let summary = {
        let members = membership.read();
        match members.host() {
            Some(host) => format!("{} listening, hosted by {}", members.len(), host.username),
            None if members.is_empty() => String::new(),
            None => format!("{} listening", members.len()),
        }
    };
    let status = session.connection();

    rsx! {
        div { class: "p-6 flex flex-col gap-4 max-w-lg",
            div { class: "flex items-center gap-3",
                Icon { name: "users".to_string(), class: "w-6 h-6 text-pink-400".to_string() }
                h1 { class: "text-2xl font-bold text-white", "Listen together" }
            }
            p { class: "text-xs text-zinc-500", "Room {id}" }
            if !summary.is_empty() {
                p { class: "text-sm text-zinc-300", "{summary}" }
            }
            {match status {
                ConnectionStatus::Connected => rsx! {},
                ConnectionStatus::Connecting => rsx! {
                    p { class: "text-sm text-zinc-400", "Connecting..." }
                },
                ConnectionStatus::Offline => rsx! {
                    p { class: "text-sm text-amber-400", "Sign in to join the room." }
                },
                ConnectionStatus::Unsupported => rsx! {
                    p { class: "text-sm text-amber-400", "Rooms are not available on this platform." }
                },
            }}
            ListUser { rows }
        }
    }
}
