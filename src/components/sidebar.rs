use crate::components::{AppView, Icon};
use crate::session::{ConnectionStatus, SessionHandle};
use dioxus::prelude::*;

/// Room opened from the sidebar shortcut.
const LOBBY_ROOM: &str = "lobby";

#[component]
pub fn Sidebar() -> Element {
    let session = use_context::<SessionHandle>();
    let view = use_route::<AppView>();
    let nav = navigator();

    let is_admin = session.role().as_deref() == Some("admin");
    let signed_in = session.access_token().is_some();
    let unread = session.notifications().iter().filter(|n| !n.is_read).count();
    let (status_label, status_class) = match session.connection() {
        ConnectionStatus::Connected => ("Live", "text-emerald-400"),
        ConnectionStatus::Connecting => ("Connecting", "text-amber-400"),
        ConnectionStatus::Offline => ("Offline", "text-zinc-500"),
        ConnectionStatus::Unsupported => ("No live channel", "text-zinc-500"),
    };
    let on_sign_out = move |_| session.sign_out();

    rsx! {
        aside { class: "w-64 bg-zinc-950/50 border-r border-zinc-800/50 flex flex-col h-full backdrop-blur-xl",
            // Logo
            div { class: "p-6 border-b border-zinc-800/50",
                div { class: "flex items-center gap-3",
                    div { class: "w-10 h-10 rounded-xl bg-gradient-to-br from-pink-500 to-rose-600 flex items-center justify-center text-white font-bold text-lg shadow-lg shadow-pink-500/20",
                        "A"
                    }
                    div {
                        h1 { class: "text-lg font-bold text-white", "AudioMelody" }
                        p { class: "text-xs {status_class}", "{status_label}" }
                    }
                }
            }

            nav { class: "flex-1 overflow-y-auto p-4 space-y-1",
                NavItem {
                    icon: "home",
                    label: "Home".to_string(),
                    active: matches!(view, AppView::Home {}),
                    onclick: move |_| {
                        nav.push(AppView::Home {});
                    },
                }
                NavItem {
                    icon: "users",
                    label: "Listen together".to_string(),
                    active: matches!(view, AppView::Room { .. }),
                    onclick: move |_| {
                        nav.push(AppView::Room { id: LOBBY_ROOM.to_string() });
                    },
                }
                NavItem {
                    icon: "bell",
                    label: if unread > 0 { format!("Notifications ({unread})") } else { "Notifications".to_string() },
                    active: matches!(view, AppView::Notifications {}),
                    onclick: move |_| {
                        nav.push(AppView::Notifications {});
                    },
                }
                if is_admin {
                    NavItem {
                        icon: "tag",
                        label: "Manage Genres".to_string(),
                        active: matches!(view, AppView::Genres {}),
                        onclick: move |_| {
                            nav.push(AppView::Genres {});
                        },
                    }
                }
            }

            if signed_in {
                div { class: "p-4 border-t border-zinc-800/50",
                    button {
                        r#type: "button",
                        class: "w-full px-3 py-2 rounded-xl text-sm text-zinc-400 hover:text-white hover:bg-zinc-800/50 transition-colors",
                        onclick: on_sign_out,
                        "Sign out"
                    }
                }
            }
        }
    }
}

#[component]
fn NavItem(icon: String, label: String, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let base_class = "flex items-center gap-3 px-3 py-2.5 rounded-xl text-sm font-medium transition-all duration-200 cursor-pointer";
    let active_class = if active {
        "bg-gradient-to-r from-pink-500/20 to-rose-500/10 text-pink-400 shadow-sm"
    } else {
        "text-zinc-400 hover:text-white hover:bg-zinc-800/50"
    };

    rsx! {
        button {
            class: "{base_class} {active_class} w-full",
            onclick: move |e| onclick.call(e),
            Icon { name: icon.clone(), class: "w-5 h-5".to_string() }
            span { "{label}" }
        }
    }
}
