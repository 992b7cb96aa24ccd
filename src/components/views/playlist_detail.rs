use crate::api::{ApiClient, Playlist, SongRecord};
use crate::components::{use_debounced_song_search, Icon, UiState};
use crate::config::FALLBACK_BANNER_COLOR;
use crate::lifecycle::Generation;
use crate::playback::PlayerHandle;
use crate::session::SessionHandle;
use crate::utils::format_duration_ms;
use dioxus::prelude::*;

/// Clears the shared loading flag when the latest load finishes or is
/// cancelled. A superseded load leaves the flag to its successor.
struct LoadingGuard {
    flag: Signal<bool>,
    generation: Generation,
    ticket: u64,
}

impl LoadingGuard {
    fn start(mut flag: Signal<bool>, generation: &Generation, ticket: u64) -> Self {
        flag.set(true);
        Self {
            flag,
            generation: generation.clone(),
            ticket,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.generation.is_current(self.ticket) {
            return;
        }
        if let Ok(mut flag) = self.flag.try_write() {
            *flag = false;
        }
    }
}

#[component]
pub fn PlaylistDetail(id: String) -> Element {
    let api = use_context::<ApiClient>();
    let session = use_context::<SessionHandle>();
    let player = use_context::<PlayerHandle>();
    let ui = use_context::<UiState>();
    let mut show_menu = ui.show_playlist_menu;
    let mut playlist = use_signal(|| None::<Playlist>);
    let mut dominant_color = use_signal(|| None::<String>);
    let mut search_term = use_signal(String::new);
    let generation = use_hook(Generation::default);

    let _load = use_resource(use_reactive!(|id| {
        let api = api.clone();
        let token = session.peek_access_token();
        let generation = generation.clone();
        let loading = ui.loading;
        async move {
            let ticket = generation.advance();
            let _guard = LoadingGuard::start(loading, &generation, ticket);
            let detail = match api.playlist_detail(&id, token.as_deref()).await {
                Ok(detail) => detail,
                Err(err) => {
                    tracing::error!(error = %err, playlist = %id, "could not load playlist");
                    return;
                }
            };
            if !generation.is_current(ticket) {
                return;
            }

            let color = match detail.image.as_deref().filter(|url| !url.is_empty()) {
                Some(image) => match api.dominant_color(image).await {
                    Ok(color) => Some(color),
                    Err(err) => {
                        tracing::error!(error = %err, "error fetching dominant color");
                        None
                    }
                },
                None => Some(FALLBACK_BANNER_COLOR.to_string()),
            };
            if generation.is_current(ticket) {
                playlist.set(Some(detail));
                dominant_color.set(color);
            }
        }
    }));

    let search_results = use_debounced_song_search(search_term);

    let loading = ui.loading;
    if loading() {
        return rsx! {
            div { class: "flex items-center justify-center py-24",
                Icon { name: "loader".to_string(), class: "w-8 h-8 text-pink-400".to_string() }
            }
        };
    }

    let Some(current) = playlist() else {
        return rsx! {
            div { class: "p-6 text-zinc-400", "Playlist not found." }
        };
    };

    let banner = dominant_color().unwrap_or_else(|| FALLBACK_BANNER_COLOR.to_string());
    let first_track = current.songs.iter().find_map(SongRecord::to_track);
    let on_play_all = {
        let player = player.clone();
        let first = first_track.clone();
        move |_| {
            if let Some(track) = first.clone() {
                player.play_track(track);
            }
        }
    };
    let on_menu_play = move |_| {
        if let Some(track) = first_track.clone() {
            player.play_track(track);
        }
        show_menu.set(false);
    };

    rsx! {
        div { class: "w-full",
            div {
                class: "m-3 rounded-lg overflow-auto",
                style: "background: linear-gradient(to bottom, {banner} 20%, rgba(0, 0, 0, 1) 80%);",
                // Banner
                div { class: "flex items-end gap-6 p-6",
                    if let Some(image) = current.image.clone() {
                        img { src: "{image}", alt: "playlist", class: "w-44 h-44 rounded-lg object-cover shadow-2xl" }
                    } else {
                        div { class: "w-44 h-44 rounded-lg bg-zinc-800 flex items-center justify-center",
                            Icon { name: "music".to_string(), class: "w-12 h-12 text-zinc-500".to_string() }
                        }
                    }
                    div {
                        p { class: "text-xs uppercase tracking-wider text-zinc-200", "Playlist" }
                        h1 { class: "text-4xl font-bold text-white", "{current.title}" }
                        if let Some(description) = current.description.clone() {
                            p { class: "text-sm text-zinc-300 mt-2", "{description}" }
                        }
                        p { class: "text-xs text-zinc-300 mt-1", "{current.songs.len()} songs" }
                    }
                }

                div { class: "m-3 flex flex-col pl-5",
                    div { class: "flex gap-5 items-center relative",
                        button {
                            r#type: "button",
                            class: "w-14 h-14 rounded-full bg-pink-500 text-white flex items-center justify-center hover:scale-105 transition-transform",
                            onclick: on_play_all,
                            Icon { name: "play".to_string(), class: "w-6 h-6 ml-0.5".to_string() }
                        }
                        button {
                            r#type: "button",
                            class: "text-pink-400 text-xl",
                            onclick: move |_| show_menu.set(!show_menu()),
                            "···"
                        }
                        if show_menu() {
                            div { class: "absolute top-14 left-20 bg-zinc-900 rounded-md shadow-xl",
                                button {
                                    r#type: "button",
                                    class: "block w-full text-left px-3 py-2 text-sm text-zinc-200 hover:bg-zinc-700 transition-colors",
                                    onclick: on_menu_play,
                                    "Play from the start"
                                }
                                button {
                                    r#type: "button",
                                    class: "block w-full text-left px-3 py-2 text-sm text-zinc-200 hover:bg-zinc-700 transition-colors",
                                    onclick: move |_| show_menu.set(false),
                                    "Close"
                                }
                            }
                        }
                    }

                    // Songs already in the playlist
                    div { class: "flex flex-col gap-1 mt-4",
                        for (index, song) in current.songs.iter().cloned().enumerate() {
                            SongRow { key: "{index}-{song.id}", song, index }
                        }
                    }

                    div { class: "w-full h-0.5 bg-zinc-600 my-5" }

                    p { class: "font-bold text-2xl mb-3 text-white", "Let's find content for your playlist" }
                    div { class: "flex items-center bg-zinc-800 w-full md:w-1/3 p-2 gap-2 rounded-md",
                        Icon { name: "search".to_string(), class: "w-5 h-5 text-zinc-400".to_string() }
                        input {
                            r#type: "text",
                            placeholder: "Find songs",
                            value: "{search_term}",
                            class: "bg-transparent w-full text-sm text-zinc-200 focus:outline-none",
                            oninput: move |e| search_term.set(e.value()),
                        }
                    }
                    div { class: "flex flex-col gap-1 mt-4",
                        for (index, song) in search_results().into_iter().enumerate() {
                            SongRow { key: "found-{index}-{song.id}", song, index }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SongRow(song: SongRecord, index: usize) -> Element {
    let player = use_context::<PlayerHandle>();
    let on_click = {
        let song = song.clone();
        move |_| match song.to_track() {
            Some(track) => player.play_track(track),
            None => tracing::warn!(song = %song.id, "song has no audio source"),
        }
    };

    rsx! {
        div {
            class: "flex items-center gap-3 px-3 py-2 rounded-lg hover:bg-zinc-800/70 cursor-pointer transition-colors",
            onclick: on_click,
            span { class: "w-6 text-sm text-zinc-400", "{index + 1}" }
            if let Some(poster) = song.poster() {
                img { src: "{poster}", alt: "Song Poster", class: "w-12 h-12 rounded-md object-cover" }
            }
            div { class: "flex-1 min-w-0",
                p { class: "text-sm font-bold text-white truncate", "{song.title}" }
                p { class: "text-xs text-zinc-400 truncate", "{song.main_artist_name()}" }
            }
            p { class: "hidden md:block w-1/3 text-xs text-zinc-400 truncate", "{song.album_title()}" }
            span { class: "text-xs text-zinc-400", "{format_duration_ms(song.duration)}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use std::cell::RefCell;

    thread_local! {
        static FLAG_TRACE: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };
    }

    fn overlapping_loads() -> Element {
        let flag = use_signal(|| false);
        let generation = use_hook(Generation::default);
        use_hook(|| {
            let first_ticket = generation.advance();
            let first = LoadingGuard::start(flag, &generation, first_ticket);
            let second_ticket = generation.advance();
            let second = LoadingGuard::start(flag, &generation, second_ticket);

            drop(first);
            FLAG_TRACE.with(|trace| trace.borrow_mut().push(*flag.peek()));
            drop(second);
            FLAG_TRACE.with(|trace| trace.borrow_mut().push(*flag.peek()));
        });
        rsx! {}
    }

    #[test]
    fn superseded_load_leaves_the_flag_raised() {
        let mut dom = VirtualDom::new(overlapping_loads);
        dom.rebuild_in_place();
        assert_eq!(FLAG_TRACE.with(|trace| trace.borrow().clone()), vec![true, false]);
    }
}
