pub mod credentials;
mod dispatch;
mod runtime;
mod store;

pub use runtime::{use_session_runtime, LiveSignal, SessionHandle};
pub use store::ConnectionStatus;
