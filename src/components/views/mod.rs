mod genres;
mod home;
mod notifications;
mod playlist_detail;
mod room;

pub use genres::Genres;
pub use home::Home;
pub use notifications::Notifications;
pub use playlist_detail::PlaylistDetail;
pub use room::Room;
