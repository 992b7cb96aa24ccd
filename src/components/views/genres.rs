use crate::components::GenreManager;
use dioxus::prelude::*;

#[component]
pub fn Genres() -> Element {
    rsx! {
        div { class: "p-6",
            GenreManager { initial: Vec::new() }
        }
    }
}
