//! Client-side playback: one media element, its derived state, and the
//! command channel the UI drives it through.

mod controller;
mod media;
mod state;

pub use controller::PlaybackController;
pub use media::*;
pub use state::PlaybackState;

use crate::api::Track;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

/// Everything that can change playback, from the UI or from the element.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Select(Track),
    Clear,
    TogglePlay,
    Seek(f64),
    SkipForward,
    SkipBackward,
    SetVolume(i32),
    ToggleMute,
    ToggleRepeat,
    Media(MediaEnvelope),
}

/// Cloneable sender half used by views to drive the player.
#[derive(Clone)]
pub struct PlayerHandle {
    tx: UnboundedSender<PlayerCommand>,
}

impl PartialEq for PlayerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_receiver(&other.tx)
    }
}

impl PlayerHandle {
    pub fn channel() -> (Self, UnboundedReceiver<PlayerCommand>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    pub fn send(&self, command: PlayerCommand) {
        if self.tx.unbounded_send(command).is_err() {
            tracing::debug!("player is gone, command dropped");
        }
    }

    pub fn play_track(&self, track: Track) {
        self.send(PlayerCommand::Select(track));
    }

    /// Sink handed to media elements; routes their events back into the queue.
    pub fn media_sink(&self) -> MediaEventSink {
        let tx = self.tx.clone();
        std::rc::Rc::new(move |envelope| {
            let _ = tx.unbounded_send(PlayerCommand::Media(envelope));
        })
    }
}

/// Apply one command. Returns true when the visible state may have changed.
pub fn apply_command<F: MediaFactory>(
    controller: &mut PlaybackController<F>,
    command: PlayerCommand,
) -> bool {
    match command {
        PlayerCommand::Select(track) => {
            let _ = controller.select_track(track);
        }
        PlayerCommand::Clear => controller.clear(),
        PlayerCommand::TogglePlay => controller.toggle_play(),
        PlayerCommand::Seek(fraction) => {
            controller.seek(fraction);
        }
        PlayerCommand::SkipForward => {
            controller.skip_forward();
        }
        PlayerCommand::SkipBackward => {
            controller.skip_backward();
        }
        PlayerCommand::SetVolume(percent) => controller.set_volume(percent),
        PlayerCommand::ToggleMute => controller.toggle_mute(),
        PlayerCommand::ToggleRepeat => controller.toggle_repeat(),
        PlayerCommand::Media(envelope) => {
            let before = controller.state().clone();
            controller.handle_media(envelope);
            return *controller.state() != before;
        }
    }
    true
}
