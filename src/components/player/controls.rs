use crate::components::{Icon, PlaybackSignal};
use crate::playback::{PlayerCommand, PlayerHandle};
use dioxus::prelude::*;

const SECONDARY_BUTTON: &str =
    "p-1.5 sm:p-2 text-zinc-400 hover:text-pink-400 transition-colors disabled:opacity-40";

#[component]
pub(super) fn PlayPauseButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let playing = use_context::<PlaybackSignal>().0.read().is_playing;

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "w-10 h-10 rounded-full bg-white text-black flex items-center justify-center hover:scale-105 transition-transform shadow-lg",
            onclick: move |_| player.send(PlayerCommand::TogglePlay),
            if playing {
                Icon { name: "pause".to_string(), class: "w-5 h-5".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "w-5 h-5 ml-0.5".to_string() }
            }
        }
    }
}

/// Jump five seconds back or forward.
#[component]
pub(super) fn SkipButton(forward: bool) -> Element {
    let player = use_context::<PlayerHandle>();
    let command = if forward {
        PlayerCommand::SkipForward
    } else {
        PlayerCommand::SkipBackward
    };

    rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            aria_label: if forward { "Forward 5 seconds" } else { "Back 5 seconds" },
            onclick: move |_| player.send(command.clone()),
            Icon {
                name: if forward { "skip-forward".to_string() } else { "skip-back".to_string() },
                class: "w-5 h-5".to_string(),
            }
        }
    }
}

#[component]
pub(super) fn RepeatButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let repeating = use_context::<PlaybackSignal>().0.read().is_repeating;

    rsx! {
        button {
            id: "repeat-btn",
            r#type: "button",
            class: if repeating { "relative p-1.5 sm:p-2 text-pink-400 transition-colors" } else { "relative p-1.5 sm:p-2 text-zinc-400 hover:text-white transition-colors" },
            title: if repeating { "Turn off repeat" } else { "Repeat this song" },
            onclick: move |_| player.send(PlayerCommand::ToggleRepeat),
            Icon { name: "repeat".to_string(), class: "w-5 h-5".to_string() }
            if repeating {
                span { class: "absolute left-1/2 -bottom-0.5 w-1 h-1 -translate-x-1/2 rounded-full bg-pink-400" }
            }
        }
    }
}

/// Mute toggle plus the 0-100 volume slider.
#[component]
pub(super) fn VolumeControl() -> Element {
    let player = use_context::<PlayerHandle>();
    let state = use_context::<PlaybackSignal>().0;
    let volume = state.read().volume_percent;
    let icon = state.read().volume_icon().name();

    let on_volume_change = {
        let player = player.clone();
        move |e: Event<FormData>| {
            if let Ok(val) = e.value().parse::<f64>() {
                player.send(PlayerCommand::SetVolume(val.round() as i32));
            }
        }
    };

    rsx! {
        div { class: "flex items-center gap-2",
            button {
                r#type: "button",
                class: "p-2 text-zinc-400 hover:text-white transition-colors",
                onclick: move |_| player.send(PlayerCommand::ToggleMute),
                Icon { name: icon.to_string(), class: "w-5 h-5".to_string() }
            }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                title: "{volume}",
                value: volume as i32,
                class: "w-24 h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-zinc-300",
                oninput: on_volume_change,
            }
        }
    }
}
