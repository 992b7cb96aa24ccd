use crate::api::ApiClient;
use crate::components::{
    use_audio_manager, view_label, AppView, Player, Sidebar, ToastStack, ToastViewport, Toaster,
};
use crate::config::AppConfig;
use crate::session::use_session_runtime;
use dioxus::prelude::*;

/// Flags shared by the shell and the pages.
#[derive(Clone, Copy, PartialEq)]
pub struct UiState {
    pub show_playlist_menu: Signal<bool>,
    pub search: Signal<String>,
    pub loading: Signal<bool>,
}

#[component]
pub fn AppShell() -> Element {
    let config = use_hook(AppConfig::from_build_env);
    let api = use_hook(|| ApiClient::new(&config));
    let ui = UiState {
        show_playlist_menu: use_signal(|| false),
        search: use_signal(String::new),
        loading: use_signal(|| false),
    };
    let toasts = use_signal(ToastStack::default);

    let (session, live) = use_session_runtime(config.clone(), api.clone());
    let (player, playback) = use_audio_manager();

    // Provide state via context
    use_context_provider(|| config.clone());
    use_context_provider(|| api.clone());
    use_context_provider(|| session.clone());
    use_context_provider(|| live);
    use_context_provider(|| player.clone());
    use_context_provider(|| playback);
    use_context_provider(|| ui);
    use_context_provider(|| Toaster::new(toasts));

    let view = use_route::<AppView>();
    let mut show_playlist_menu = ui.show_playlist_menu;

    // Menus belong to the page they were opened on.
    use_effect(use_reactive!(|view| {
        let _ = view;
        show_playlist_menu.set(false);
    }));

    rsx! {
        div { class: "app-container flex min-h-screen text-white bg-zinc-950 overflow-hidden",
            Sidebar {}

            // Main content area
            div { class: "flex-1 flex flex-col overflow-hidden",
                header { class: "border-b border-zinc-800/60 bg-zinc-950/80 backdrop-blur-xl px-4 py-3",
                    span { class: "text-sm font-semibold text-white", "{view_label(&view)}" }
                }
                main { class: "flex-1 overflow-y-auto pb-32",
                    Outlet::<AppView> {}
                }
            }

            // Fixed bottom player
            Player {}
        }

        ToastViewport {}
    }
}
