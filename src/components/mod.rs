//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_manager;
mod genre_manager;
mod icons;
mod list_user;
mod player;
mod sidebar;
mod song_search;
mod toast;
mod trending_songs;
mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use genre_manager::*;
pub use icons::*;
pub use list_user::*;
pub use player::*;
pub use sidebar::*;
pub use song_search::*;
pub use toast::*;
pub use trending_songs::*;
// Views are reached through the router.
