//! Audio manager: runs playback outside the component render cycle so
//! unrelated state changes never restart the track.

use crate::lifecycle::ScopedTask;
use crate::playback::{apply_command, PlaybackController, PlaybackState, PlayerHandle};
use dioxus::prelude::*;
use futures_util::StreamExt;
use std::rc::Rc;

/// Latest playback snapshot published by the audio task.
#[derive(Clone, Copy, PartialEq)]
pub struct PlaybackSignal(pub Signal<PlaybackState>);

#[cfg(target_arch = "wasm32")]
fn platform_factory(sink: crate::playback::MediaEventSink) -> crate::playback::WebAudioFactory {
    crate::playback::WebAudioFactory::new(sink)
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_factory(sink: crate::playback::MediaEventSink) -> crate::playback::SilentMediaFactory {
    crate::playback::SilentMediaFactory::new(sink)
}

/// Start the single task that owns the player and return the handle views
/// use to drive it.
pub fn use_audio_manager() -> (PlayerHandle, PlaybackSignal) {
    let snapshot = use_signal(PlaybackState::default);

    let (handle, _task) = use_hook(|| {
        let (handle, mut commands) = PlayerHandle::channel();
        let factory = platform_factory(handle.media_sink());
        let mut snapshot = snapshot;
        let task = ScopedTask::spawn(async move {
            let mut controller = PlaybackController::new(factory);
            while let Some(command) = commands.next().await {
                if apply_command(&mut controller, command) {
                    snapshot.set(controller.state().clone());
                }
            }
            tracing::debug!("player command channel closed");
        });
        (handle, Rc::new(task))
    });

    (handle, PlaybackSignal(snapshot))
}
