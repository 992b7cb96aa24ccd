use crate::components::Icon;
use crate::session::SessionHandle;
use crate::utils::format_created_at;
use dioxus::prelude::*;

/// Session notifications, newest first.
#[component]
pub fn Notifications() -> Element {
    let session = use_context::<SessionHandle>();
    let notifications = session.notifications();
    let signed_in = session.access_token().is_some();

    rsx! {
        div { class: "p-6 flex flex-col gap-3 max-w-2xl",
            div { class: "flex items-center gap-3 mb-2",
                Icon { name: "bell".to_string(), class: "w-6 h-6 text-pink-400".to_string() }
                h1 { class: "text-2xl font-bold text-white", "Notifications" }
            }
            if !signed_in {
                p { class: "text-sm text-zinc-400", "Sign in to see your notifications." }
            } else if notifications.is_empty() {
                p { class: "text-sm text-zinc-400", "You're all caught up." }
            }
            for (index, notification) in notifications.into_iter().enumerate() {
                div {
                    key: "{index}-{notification.id}",
                    class: if notification.is_read { "px-4 py-3 rounded-xl bg-zinc-900/40" } else { "px-4 py-3 rounded-xl bg-zinc-900 border border-pink-500/30" },
                    if let Some(title) = notification.title.clone() {
                        p { class: "text-sm font-semibold text-white", "{title}" }
                    }
                    if let Some(content) = notification.content.clone() {
                        p { class: "text-sm text-zinc-300", "{content}" }
                    }
                    if let Some(created_at) = notification.created_at.as_deref() {
                        p { class: "text-xs text-zinc-500 mt-1", "{format_created_at(created_at)}" }
                    }
                }
            }
        }
    }
}
