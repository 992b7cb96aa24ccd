//! The Socket.IO channel: wire codec, typed events and the connection.

mod connection;
mod events;
pub mod protocol;

pub use connection::{LiveConnection, LiveError, LiveHandle};
pub use events::*;
