use crate::api::Track;
use crate::config::INITIAL_VOLUME_PERCENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

impl VolumeIcon {
    pub fn name(self) -> &'static str {
        match self {
            VolumeIcon::Muted => "volume-x",
            VolumeIcon::Low => "volume-low",
            VolumeIcon::High => "volume-high",
        }
    }
}

/// Snapshot of what the player bar renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub phase: PlaybackPhase,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub volume_percent: u8,
    pub is_muted: bool,
    pub is_repeating: bool,
    pub last_error: Option<String>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            phase: PlaybackPhase::Idle,
            is_playing: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume_percent: INITIAL_VOLUME_PERCENT,
            is_muted: false,
            is_repeating: false,
            last_error: None,
        }
    }
}

impl PlaybackState {
    /// Position as a percentage of the duration, always within [0, 100].
    pub fn progress_percent(&self) -> f64 {
        let duration = self.duration_seconds;
        if !duration.is_finite() || duration <= 0.0 {
            return 0.0;
        }
        let progress = self.position_seconds / duration * 100.0;
        if progress.is_finite() {
            progress.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Icon choice only looks at the stored volume, not the mute flag.
    pub fn volume_icon(&self) -> VolumeIcon {
        match self.volume_percent {
            0 => VolumeIcon::Muted,
            1..=49 => VolumeIcon::Low,
            _ => VolumeIcon::High,
        }
    }

    pub fn has_duration(&self) -> bool {
        self.duration_seconds.is_finite() && self.duration_seconds > 0.0
    }

    /// Clamp a target time into the playable range.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        if self.has_duration() {
            seconds.clamp(0.0, self.duration_seconds)
        } else {
            seconds.max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(position: f64, duration: f64) -> PlaybackState {
        PlaybackState {
            position_seconds: position,
            duration_seconds: duration,
            ..Default::default()
        }
    }

    #[test]
    fn progress_is_zero_without_duration() {
        assert_eq!(at(12.0, 0.0).progress_percent(), 0.0);
        assert_eq!(at(12.0, f64::NAN).progress_percent(), 0.0);
        assert_eq!(at(12.0, f64::INFINITY).progress_percent(), 0.0);
    }

    #[test]
    fn progress_tracks_position() {
        assert_eq!(at(30.0, 120.0).progress_percent(), 25.0);
        assert_eq!(at(120.0, 120.0).progress_percent(), 100.0);
    }

    #[test]
    fn progress_stays_in_range() {
        assert_eq!(at(500.0, 120.0).progress_percent(), 100.0);
        assert_eq!(at(-5.0, 120.0).progress_percent(), 0.0);
    }

    #[test]
    fn volume_icon_thresholds() {
        let mut state = PlaybackState::default();
        state.volume_percent = 0;
        assert_eq!(state.volume_icon(), VolumeIcon::Muted);
        state.volume_percent = 1;
        assert_eq!(state.volume_icon(), VolumeIcon::Low);
        state.volume_percent = 49;
        assert_eq!(state.volume_icon(), VolumeIcon::Low);
        state.volume_percent = 50;
        assert_eq!(state.volume_icon(), VolumeIcon::High);
    }

    #[test]
    fn clamp_without_duration_only_floors() {
        let state = at(0.0, 0.0);
        assert_eq!(state.clamp_position(-3.0), 0.0);
        assert_eq!(state.clamp_position(42.0), 42.0);
    }
}
