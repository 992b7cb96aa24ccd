use crate::api::SongRecord;
use crate::components::Icon;
use crate::playback::PlayerHandle;
use crate::utils::{format_created_at, format_duration_ms};
use dioxus::prelude::*;

pub const TRENDING_LIMIT: usize = 10;

/// Ranked table of the first ten songs. Clicking a row plays it.
#[component]
pub fn TrendingSongs(title: String, subtitle: String, songs: Vec<SongRecord>) -> Element {
    let player = use_context::<PlayerHandle>();

    rsx! {
        div { class: "w-full mt-2",
            h2 { class: "text-2xl font-bold text-white mb-3",
                "{title} "
                span { class: "text-pink-400", "{subtitle}" }
            }
            table { class: "w-full text-white border-separate border-spacing-y-3",
                thead {
                    tr { class: "text-xs text-zinc-400",
                        th { class: "w-[4%]" }
                        th { class: "w-[6%]" }
                        th { class: "w-[30%]" }
                        th { class: "w-[18%]", "Release Date" }
                        th { class: "w-[30%]", "Album" }
                        th { class: "w-[12%]", "Time" }
                    }
                }
                tbody {
                    for (index, song) in songs.into_iter().take(TRENDING_LIMIT).enumerate() {
                        tr {
                            key: "{index}-{song.id}",
                            class: "bg-zinc-900 cursor-pointer hover:bg-zinc-800 transition-colors",
                            onclick: {
                                let player = player.clone();
                                let song = song.clone();
                                move |_| match song.to_track() {
                                    Some(track) => player.play_track(track),
                                    None => tracing::warn!(song = %song.id, "song has no audio source"),
                                }
                            },
                            td { class: "pl-4 pr-6 text-lg font-semibold rounded-l-lg", "#{index + 1}" }
                            td { class: "py-1",
                                if let Some(poster) = song.poster() {
                                    img { src: "{poster}", alt: "song", class: "w-14 h-14 rounded-lg object-cover" }
                                } else {
                                    div { class: "w-14 h-14 rounded-lg bg-zinc-800 flex items-center justify-center",
                                        Icon { name: "music".to_string(), class: "w-5 h-5 text-zinc-500".to_string() }
                                    }
                                }
                            }
                            td { class: "pl-4",
                                p { class: "text-sm font-medium line-clamp-2", "{song.title}" }
                                p { class: "text-xs text-zinc-400 line-clamp-1", "{song.main_artist_name()}" }
                            }
                            td { class: "text-xs text-zinc-300 text-center",
                                {song.created_at.as_deref().map(format_created_at).unwrap_or_default()}
                            }
                            td { class: "text-xs text-zinc-300 text-center", "{song.album_title()}" }
                            td { class: "text-xs text-zinc-300 text-center rounded-r-lg",
                                "{format_duration_ms(song.duration)}"
                            }
                        }
                    }
                }
            }
        }
    }
}
