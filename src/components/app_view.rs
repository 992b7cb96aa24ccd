//! Routes of the application. Every page renders inside [`AppShell`].

use crate::components::views::{Genres, Home, Notifications, PlaylistDetail, Room};
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        Home {},
        #[route("/playlist/:id")]
        PlaylistDetail { id: String },
        #[route("/genres")]
        Genres {},
        #[route("/room/:id")]
        Room { id: String },
        #[route("/notifications")]
        Notifications {},
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::Home {} => "Home",
        AppView::PlaylistDetail { .. } => "Playlist",
        AppView::Genres {} => "Genres",
        AppView::Room { .. } => "Room",
        AppView::Notifications {} => "Notifications",
    }
}
