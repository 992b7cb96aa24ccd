use super::media::{MediaElement, MediaEnvelope, MediaEvent, MediaFactory, PlaybackError};
use super::state::{PlaybackPhase, PlaybackState};
use crate::api::Track;
use crate::config::{SKIP_STEP_SECONDS, UNMUTE_VOLUME_PERCENT};

/// Owns the single active media element and the playback state derived
/// from it.
pub struct PlaybackController<F: MediaFactory> {
    factory: F,
    element: Option<F::Element>,
    element_id: u64,
    state: PlaybackState,
}

impl<F: MediaFactory> PlaybackController<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            element: None,
            element_id: 0,
            state: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[cfg(test)]
    pub fn has_element(&self) -> bool {
        self.element.is_some()
    }

    /// Bind `track` as the current track. The previous element is torn down
    /// before the new one is created, then autoplay is requested.
    pub fn select_track(&mut self, track: Track) -> Result<(), PlaybackError> {
        drop(self.element.take());
        self.element_id += 1;

        self.state.current_track = Some(track.clone());
        self.state.phase = PlaybackPhase::Loading;
        self.state.is_playing = false;
        self.state.position_seconds = 0.0;
        self.state.duration_seconds = 0.0;
        self.state.last_error = None;

        let mut element = match self.factory.create(self.element_id, &track.audio_url) {
            Ok(element) => element,
            Err(err) => {
                tracing::error!(track = %track.id, error = %err, "could not create media element");
                self.state.phase = PlaybackPhase::Idle;
                self.state.last_error = Some(err.to_string());
                return Err(err);
            }
        };
        element.set_volume(f64::from(self.state.volume_percent) / 100.0);
        element.set_loop(self.state.is_repeating);
        element.play();
        self.element = Some(element);
        tracing::debug!(track = %track.id, "track selected");
        Ok(())
    }

    /// Stop and release the element, returning to idle.
    pub fn clear(&mut self) {
        drop(self.element.take());
        self.element_id += 1;
        let volume = self.state.volume_percent;
        let muted = self.state.is_muted;
        let repeating = self.state.is_repeating;
        self.state = PlaybackState {
            volume_percent: volume,
            is_muted: muted,
            is_repeating: repeating,
            ..PlaybackState::default()
        };
    }

    /// Apply an element event. Events from torn-down elements are ignored.
    pub fn handle_media(&mut self, envelope: MediaEnvelope) {
        if envelope.element_id != self.element_id || self.element.is_none() {
            return;
        }
        match envelope.event {
            MediaEvent::MetadataLoaded { duration } => {
                self.state.duration_seconds = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
            }
            MediaEvent::TimeUpdate { position } => {
                if position.is_finite() {
                    self.state.position_seconds = position.max(0.0);
                }
            }
            MediaEvent::Ended => {
                self.state.is_playing = false;
                self.state.phase = PlaybackPhase::Ended;
            }
            MediaEvent::PlayStarted => {
                self.state.is_playing = true;
                self.state.phase = PlaybackPhase::Playing;
            }
            MediaEvent::PlayRejected(reason) => {
                tracing::warn!(%reason, "autoplay failed");
                self.state.is_playing = false;
                self.state.last_error = Some(reason);
                if self.state.has_duration() {
                    self.state.phase = PlaybackPhase::Paused;
                }
            }
        }
    }

    pub fn toggle_play(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        if self.state.is_playing {
            element.pause();
            self.state.is_playing = false;
            self.state.phase = PlaybackPhase::Paused;
        } else {
            element.play();
            self.state.is_playing = true;
            self.state.phase = PlaybackPhase::Playing;
        }
    }

    /// Jump to `fraction` of the duration. Returns the applied time.
    pub fn seek(&mut self, fraction: f64) -> Option<f64> {
        let element = self.element.as_mut()?;
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = fraction * self.state.duration_seconds;
        element.set_current_time(target);
        self.state.position_seconds = target;
        Some(target)
    }

    pub fn skip_forward(&mut self) -> Option<f64> {
        self.skip_by(SKIP_STEP_SECONDS)
    }

    pub fn skip_backward(&mut self) -> Option<f64> {
        self.skip_by(-SKIP_STEP_SECONDS)
    }

    fn skip_by(&mut self, delta: f64) -> Option<f64> {
        let target = self
            .state
            .clamp_position(self.state.position_seconds + delta);
        let element = self.element.as_mut()?;
        element.set_current_time(target);
        self.state.position_seconds = target;
        Some(target)
    }

    /// Store a volume in percent, clamped to [0, 100]. Leaves the mute flag alone.
    pub fn set_volume(&mut self, percent: i32) {
        let percent = percent.clamp(0, 100) as u8;
        self.state.volume_percent = percent;
        if let Some(element) = self.element.as_mut() {
            element.set_volume(f64::from(percent) / 100.0);
        }
    }

    /// Mute forces volume to 0; unmute always restores the fixed default,
    /// not the level from before muting.
    pub fn toggle_mute(&mut self) {
        let percent = if self.state.is_muted {
            UNMUTE_VOLUME_PERCENT
        } else {
            0
        };
        self.state.volume_percent = percent;
        self.state.is_muted = !self.state.is_muted;
        if let Some(element) = self.element.as_mut() {
            element.set_volume(f64::from(percent) / 100.0);
        }
    }

    pub fn toggle_repeat(&mut self) {
        self.state.is_repeating = !self.state.is_repeating;
        if let Some(element) = self.element.as_mut() {
            element.set_loop(self.state.is_repeating);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(u64, String),
        Play(u64),
        Pause(u64),
        Time(u64, f64),
        Volume(u64, f64),
        Loop(u64, bool),
        Dropped(u64),
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct FakeElement {
        id: u64,
        log: Log,
    }

    impl MediaElement for FakeElement {
        fn play(&mut self) {
            self.log.borrow_mut().push(Call::Play(self.id));
        }
        fn pause(&mut self) {
            self.log.borrow_mut().push(Call::Pause(self.id));
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.log.borrow_mut().push(Call::Time(self.id, seconds));
        }
        fn set_volume(&mut self, fraction: f64) {
            self.log.borrow_mut().push(Call::Volume(self.id, fraction));
        }
        fn set_loop(&mut self, looping: bool) {
            self.log.borrow_mut().push(Call::Loop(self.id, looping));
        }
    }

    impl Drop for FakeElement {
        fn drop(&mut self) {
            self.log.borrow_mut().push(Call::Dropped(self.id));
        }
    }

    struct FakeFactory {
        log: Log,
        fail: bool,
    }

    impl MediaFactory for FakeFactory {
        type Element = FakeElement;

        fn create(&mut self, id: u64, url: &str) -> Result<FakeElement, PlaybackError> {
            if self.fail {
                return Err(PlaybackError::ElementUnavailable("no audio".into()));
            }
            self.log.borrow_mut().push(Call::Create(id, url.to_string()));
            Ok(FakeElement {
                id,
                log: self.log.clone(),
            })
        }
    }

    fn controller() -> (PlaybackController<FakeFactory>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let factory = FakeFactory {
            log: log.clone(),
            fail: false,
        };
        (PlaybackController::new(factory), log)
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            audio_url: format!("https://cdn/{id}.mp3"),
            poster_url: None,
        }
    }

    fn event(ctrl: &mut PlaybackController<FakeFactory>, event: MediaEvent) {
        let element_id = ctrl.element_id;
        ctrl.handle_media(MediaEnvelope { element_id, event });
    }

    fn playing(ctrl: &mut PlaybackController<FakeFactory>, id: &str, duration: f64) {
        ctrl.select_track(track(id)).unwrap();
        event(ctrl, MediaEvent::MetadataLoaded { duration });
        event(ctrl, MediaEvent::PlayStarted);
    }

    #[test]
    fn select_goes_through_loading_to_playing() {
        let (mut ctrl, log) = controller();
        ctrl.select_track(track("a")).unwrap();
        assert_eq!(ctrl.state().phase, PlaybackPhase::Loading);
        assert!(!ctrl.state().is_playing);

        event(&mut ctrl, MediaEvent::PlayStarted);
        assert_eq!(ctrl.state().phase, PlaybackPhase::Playing);
        assert!(ctrl.state().is_playing);

        let calls = log.borrow();
        assert_eq!(calls[0], Call::Create(1, "https://cdn/a.mp3".into()));
        assert!(calls.contains(&Call::Volume(1, 1.0)));
        assert!(calls.contains(&Call::Loop(1, false)));
        assert!(calls.contains(&Call::Play(1)));
    }

    #[test]
    fn switching_tracks_tears_down_before_creating() {
        let (mut ctrl, log) = controller();
        ctrl.select_track(track("a")).unwrap();
        ctrl.select_track(track("b")).unwrap();

        let calls = log.borrow();
        let dropped = calls.iter().position(|c| *c == Call::Dropped(1)).unwrap();
        let created = calls
            .iter()
            .position(|c| matches!(c, Call::Create(2, _)))
            .unwrap();
        assert!(dropped < created);
    }

    #[test]
    fn switching_tracks_resets_progress() {
        let (mut ctrl, _log) = controller();
        playing(&mut ctrl, "a", 120.0);
        event(&mut ctrl, MediaEvent::TimeUpdate { position: 30.0 });
        assert_eq!(ctrl.state().progress_percent(), 25.0);

        ctrl.select_track(track("b")).unwrap();
        assert_eq!(ctrl.state().progress_percent(), 0.0);
        assert_eq!(ctrl.state().position_seconds, 0.0);
        assert_eq!(ctrl.state().duration_seconds, 0.0);

        event(&mut ctrl, MediaEvent::MetadataLoaded { duration: 200.0 });
        event(&mut ctrl, MediaEvent::TimeUpdate { position: 50.0 });
        assert_eq!(ctrl.state().duration_seconds, 200.0);
        assert_eq!(ctrl.state().progress_percent(), 25.0);
        assert_eq!(ctrl.state().current_track.as_ref().unwrap().id, "b");
    }

    #[test]
    fn stale_element_events_are_ignored() {
        let (mut ctrl, _log) = controller();
        ctrl.select_track(track("a")).unwrap();
        ctrl.select_track(track("b")).unwrap();

        ctrl.handle_media(MediaEnvelope {
            element_id: 1,
            event: MediaEvent::MetadataLoaded { duration: 999.0 },
        });
        ctrl.handle_media(MediaEnvelope {
            element_id: 1,
            event: MediaEvent::PlayStarted,
        });
        assert_eq!(ctrl.state().duration_seconds, 0.0);
        assert_eq!(ctrl.state().phase, PlaybackPhase::Loading);
    }

    #[test]
    fn autoplay_rejection_is_not_retried() {
        let (mut ctrl, log) = controller();
        ctrl.select_track(track("a")).unwrap();
        event(&mut ctrl, MediaEvent::PlayRejected("NotAllowedError".into()));
        assert_eq!(ctrl.state().phase, PlaybackPhase::Loading);
        assert_eq!(ctrl.state().last_error.as_deref(), Some("NotAllowedError"));
        assert!(!ctrl.state().is_playing);
        let plays = log
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Play(_)))
            .count();
        assert_eq!(plays, 1);
    }

    #[test]
    fn autoplay_rejection_after_metadata_pauses() {
        let (mut ctrl, _log) = controller();
        ctrl.select_track(track("a")).unwrap();
        event(&mut ctrl, MediaEvent::MetadataLoaded { duration: 90.0 });
        event(&mut ctrl, MediaEvent::PlayRejected("blocked".into()));
        assert_eq!(ctrl.state().phase, PlaybackPhase::Paused);
    }

    #[test]
    fn toggle_play_flips_between_playing_and_paused() {
        let (mut ctrl, log) = controller();
        playing(&mut ctrl, "a", 60.0);

        ctrl.toggle_play();
        assert_eq!(ctrl.state().phase, PlaybackPhase::Paused);
        assert!(log.borrow().contains(&Call::Pause(1)));

        ctrl.toggle_play();
        assert_eq!(ctrl.state().phase, PlaybackPhase::Playing);
        assert!(ctrl.state().is_playing);
    }

    #[test]
    fn toggle_play_without_track_does_nothing() {
        let (mut ctrl, log) = controller();
        ctrl.toggle_play();
        assert_eq!(ctrl.state().phase, PlaybackPhase::Idle);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn ended_stops_playing() {
        let (mut ctrl, _log) = controller();
        playing(&mut ctrl, "a", 60.0);
        event(&mut ctrl, MediaEvent::Ended);
        assert_eq!(ctrl.state().phase, PlaybackPhase::Ended);
        assert!(!ctrl.state().is_playing);

        ctrl.toggle_play();
        assert_eq!(ctrl.state().phase, PlaybackPhase::Playing);
    }

    #[test]
    fn seek_maps_fraction_onto_duration() {
        let (mut ctrl, log) = controller();
        playing(&mut ctrl, "a", 120.0);

        for (fraction, expected) in [(0.0, 0.0), (0.25, 30.0), (0.5, 60.0), (1.0, 120.0)] {
            assert_eq!(ctrl.seek(fraction), Some(expected));
            assert_eq!(ctrl.state().position_seconds, expected);
        }
        assert!(log.borrow().contains(&Call::Time(1, 30.0)));
    }

    #[test]
    fn seek_clamps_fraction() {
        let (mut ctrl, _log) = controller();
        playing(&mut ctrl, "a", 80.0);
        assert_eq!(ctrl.seek(1.7), Some(80.0));
        assert_eq!(ctrl.seek(-0.2), Some(0.0));
        assert_eq!(ctrl.seek(f64::NAN), Some(0.0));
    }

    #[test]
    fn seek_without_element_is_none() {
        let (mut ctrl, _log) = controller();
        assert_eq!(ctrl.seek(0.5), None);
    }

    #[test]
    fn skip_moves_five_seconds_within_bounds() {
        let (mut ctrl, _log) = controller();
        playing(&mut ctrl, "a", 12.0);
        event(&mut ctrl, MediaEvent::TimeUpdate { position: 3.0 });

        assert_eq!(ctrl.skip_forward(), Some(8.0));
        assert_eq!(ctrl.skip_forward(), Some(12.0));
        assert_eq!(ctrl.skip_backward(), Some(7.0));
        assert_eq!(ctrl.skip_backward(), Some(2.0));
        assert_eq!(ctrl.skip_backward(), Some(0.0));
    }

    #[test]
    fn volume_is_stored_exactly_and_clamped() {
        let (mut ctrl, log) = controller();
        ctrl.select_track(track("a")).unwrap();
        for percent in [0, 1, 37, 99, 100] {
            ctrl.set_volume(percent);
            assert_eq!(ctrl.state().volume_percent as i32, percent);
        }
        ctrl.set_volume(140);
        assert_eq!(ctrl.state().volume_percent, 100);
        ctrl.set_volume(-12);
        assert_eq!(ctrl.state().volume_percent, 0);
        assert!(!ctrl.state().is_muted);
        assert!(log.borrow().contains(&Call::Volume(1, 0.37)));
    }

    #[test]
    fn mute_twice_restores_fixed_default() {
        let (mut ctrl, _log) = controller();
        ctrl.select_track(track("a")).unwrap();
        ctrl.set_volume(85);

        ctrl.toggle_mute();
        assert!(ctrl.state().is_muted);
        assert_eq!(ctrl.state().volume_percent, 0);

        ctrl.toggle_mute();
        assert!(!ctrl.state().is_muted);
        assert_eq!(ctrl.state().volume_percent, UNMUTE_VOLUME_PERCENT);
    }

    #[test]
    fn mute_works_before_any_track() {
        let (mut ctrl, _log) = controller();
        ctrl.toggle_mute();
        ctrl.toggle_mute();
        assert_eq!(ctrl.state().volume_percent, 20);
    }

    #[test]
    fn repeat_flag_follows_to_next_element() {
        let (mut ctrl, log) = controller();
        ctrl.select_track(track("a")).unwrap();
        ctrl.toggle_repeat();
        assert!(ctrl.state().is_repeating);
        assert!(log.borrow().contains(&Call::Loop(1, true)));

        ctrl.select_track(track("b")).unwrap();
        assert!(log.borrow().contains(&Call::Loop(2, true)));
    }

    #[test]
    fn failed_element_creation_leaves_idle() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut ctrl = PlaybackController::new(FakeFactory {
            log: log.clone(),
            fail: true,
        });
        assert!(ctrl.select_track(track("a")).is_err());
        assert_eq!(ctrl.state().phase, PlaybackPhase::Idle);
        assert!(!ctrl.has_element());
        assert!(ctrl.state().last_error.is_some());
    }

    #[test]
    fn clear_keeps_preferences() {
        let (mut ctrl, log) = controller();
        ctrl.select_track(track("a")).unwrap();
        ctrl.set_volume(40);
        ctrl.toggle_repeat();
        ctrl.clear();

        assert!(ctrl.state().current_track.is_none());
        assert_eq!(ctrl.state().volume_percent, 40);
        assert!(ctrl.state().is_repeating);
        assert!(log.borrow().contains(&Call::Dropped(1)));
    }
}
