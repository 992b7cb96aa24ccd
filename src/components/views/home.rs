use crate::components::{use_debounced_song_search, Icon, TrendingSongs, UiState};
use crate::session::SessionHandle;
use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    let ui = use_context::<UiState>();
    let session = use_context::<SessionHandle>();
    let mut search = ui.search;
    let results = use_debounced_song_search(search);
    let songs = results();
    let signed_out = session.access_token().is_none();
    let greeting = match session.role().as_deref() {
        Some("admin") => "Welcome back, admin",
        Some(_) => "Welcome back",
        None => "Welcome",
    };

    rsx! {
        div { class: "p-6 flex flex-col gap-6",
            h1 { class: "text-3xl font-bold text-white", "{greeting}" }
            if signed_out {
                SignInCard {}
            }
            div { class: "flex items-center bg-zinc-800 w-full md:w-1/2 p-2 gap-2 rounded-md",
                Icon { name: "search".to_string(), class: "w-5 h-5 text-zinc-400".to_string() }
                input {
                    r#type: "text",
                    placeholder: "What do you want to listen to?",
                    value: "{search}",
                    class: "bg-transparent w-full text-sm text-zinc-200 focus:outline-none",
                    oninput: move |e| search.set(e.value()),
                }
            }
            if search().is_empty() {
                p { class: "text-sm text-zinc-500", "Search for a song to see what's trending." }
            } else if songs.is_empty() {
                p { class: "text-sm text-zinc-500", "No songs found." }
            } else {
                TrendingSongs {
                    title: "Trending".to_string(),
                    subtitle: "Songs".to_string(),
                    songs,
                }
            }
        }
    }
}

/// Paste credentials issued elsewhere. Both fields are required.
#[component]
fn SignInCard() -> Element {
    let session = use_context::<SessionHandle>();
    let mut token = use_signal(String::new);
    let mut role = use_signal(|| "user".to_string());

    let on_submit = move |_| {
        let access_token = token().trim().to_string();
        let role_name = role().trim().to_string();
        if access_token.is_empty() || role_name.is_empty() {
            return;
        }
        session.sign_in(&access_token, &role_name);
        token.set(String::new());
    };

    rsx! {
        div { class: "max-w-md flex flex-col gap-2 p-4 rounded-xl bg-zinc-900/70 border border-zinc-800",
            p { class: "text-sm text-zinc-300", "Sign in with an access token" }
            input {
                r#type: "password",
                placeholder: "Access token",
                value: "{token}",
                class: "px-3 py-2 rounded-md bg-zinc-950 border border-zinc-700 text-sm text-white",
                oninput: move |e| token.set(e.value()),
            }
            input {
                r#type: "text",
                placeholder: "Role",
                value: "{role}",
                class: "px-3 py-2 rounded-md bg-zinc-950 border border-zinc-700 text-sm text-white",
                oninput: move |e| role.set(e.value()),
            }
            button {
                r#type: "button",
                class: "self-start px-4 py-2 rounded-full bg-pink-500 text-white text-sm font-semibold hover:bg-pink-600 transition-colors",
                onclick: on_submit,
                "Sign in"
            }
        }
    }
}
