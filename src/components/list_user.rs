use crate::components::Icon;
use crate::room::ParticipantRow;
use dioxus::prelude::*;

/// Participants of a listening room. The host gets a crown.
#[component]
pub fn ListUser(rows: Vec<ParticipantRow>) -> Element {
    rsx! {
        div { class: "flex flex-col gap-2",
            if rows.is_empty() {
                p { class: "text-sm text-zinc-500 px-3 py-2", "No user" }
            }
            for (index, row) in rows.into_iter().enumerate() {
                div {
                    key: "{index}-{row.username}",
                    class: "flex items-center justify-between gap-3 px-3 py-2 rounded-xl bg-zinc-900/60",
                    div { class: "flex items-center gap-3 min-w-0",
                        div { class: "w-8 h-8 rounded-full bg-zinc-700 flex items-center justify-center text-sm font-semibold text-white",
                            {row.username.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()}
                        }
                        span { class: "text-sm text-white truncate", "{row.username}" }
                    }
                    if row.show_host_badge {
                        span { class: "flex items-center gap-1 text-xs text-amber-400",
                            Icon { name: "crown".to_string(), class: "w-4 h-4".to_string() }
                            "Host"
                        }
                    }
                }
            }
        }
    }
}
