mod controls;

use crate::components::{Icon, PlaybackSignal};
use crate::playback::{PlayerCommand, PlayerHandle};
use crate::utils::format_time;
use controls::{PlayPauseButton, RepeatButton, SkipButton, VolumeControl};
use dioxus::prelude::*;

/// Fixed bottom bar for the current track. Hidden until a track is chosen.
#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerHandle>();
    let state = use_context::<PlaybackSignal>().0.read().clone();

    let Some(track) = state.current_track.clone() else {
        return rsx! {};
    };

    let progress = state.progress_percent();
    let has_duration = state.has_duration();

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            player.send(PlayerCommand::Seek(percent / 100.0));
        }
    };

    rsx! {
        div { class: "fixed bottom-0 left-0 right-0 z-40 bg-zinc-950/95 border-t border-zinc-800/60 backdrop-blur-xl",
            div { class: "flex flex-col md:flex-row items-center gap-3 px-4 py-3",
                // Track info
                div { class: "flex items-center gap-3 w-full md:w-1/4 min-w-0",
                    if let Some(poster) = track.poster_url.clone() {
                        img {
                            src: "{poster}",
                            alt: "Song Poster",
                            class: "w-14 h-14 rounded-md object-cover",
                        }
                    } else {
                        div { class: "w-14 h-14 rounded-md bg-zinc-800 flex items-center justify-center",
                            Icon { name: "music".to_string(), class: "w-6 h-6 text-zinc-500".to_string() }
                        }
                    }
                    div { class: "min-w-0",
                        p { class: "text-sm text-white truncate", "{track.title}" }
                        p { class: "text-xs text-zinc-400 truncate", "{track.artist}" }
                    }
                }

                // Controls and progress
                div { class: "flex flex-col items-center gap-2 w-full md:flex-1 md:max-w-2xl",
                    div { class: "flex items-center gap-2 md:gap-4 justify-center",
                        SkipButton { forward: false }
                        PlayPauseButton {}
                        SkipButton { forward: true }
                        RepeatButton {}
                    }
                    div { class: "flex items-center gap-2 w-full",
                        span { class: "text-xs text-zinc-500 w-10 text-right",
                            "{format_time(state.position_seconds)}"
                        }
                        input {
                            r#type: "range",
                            min: "0",
                            max: "100",
                            step: "0.1",
                            disabled: !has_duration,
                            value: progress,
                            class: "flex-1 h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-white",
                            oninput: on_seek_input,
                        }
                        span { class: "text-xs text-zinc-500 w-10",
                            "{format_time(state.duration_seconds)}"
                        }
                    }
                    if let Some(error) = state.last_error.clone() {
                        p { class: "text-xs text-amber-400", "Playback blocked: {error}" }
                    }
                }

                div { class: "flex items-center w-full md:w-1/4 justify-end",
                    VolumeControl {}
                }
            }
        }
    }
}
