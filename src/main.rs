use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod diagnostics;
mod lifecycle;
mod live;
mod playback;
mod room;
mod session;
mod utils;

use components::AppView;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "AudioMelody" }
        document::Meta { name: "theme-color", content: "#ec4899" }
        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
