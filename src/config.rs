//! Client configuration resolved at build time plus the fixed tunables
//! shared by the session, playback and search code.

use std::time::Duration;

/// How often a present access token is exchanged for a fresh one.
pub const TOKEN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// Quiet period after the last keystroke before a song search fires.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;
/// Volume restored when the player is unmuted.
pub const UNMUTE_VOLUME_PERCENT: u8 = 20;
/// Volume used before the listener touches the slider.
pub const INITIAL_VOLUME_PERCENT: u8 = 100;
/// Seconds moved by the skip buttons.
pub const SKIP_STEP_SECONDS: f64 = 5.0;
/// Lifetime of the persisted credential cookies.
pub const CREDENTIAL_COOKIE_DAYS: i64 = 7;
/// Banner colour used when a playlist has no artwork.
pub const FALLBACK_BANNER_COLOR: &str = "#595959";
/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 4000;

const DEFAULT_API_ENDPOINT: &str = "http://localhost:4000";
const DEFAULT_COLOR_ENDPOINT: &str = "/api/get-dominant-color";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the backend API, also used for the live channel.
    pub api_endpoint: String,
    /// Endpoint returning `{ "dominantColor": ... }` for an image URL.
    pub color_endpoint: String,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("AUDIOMELODY_API_ENDPOINT").unwrap_or(DEFAULT_API_ENDPOINT),
            option_env!("AUDIOMELODY_COLOR_ENDPOINT").unwrap_or(DEFAULT_COLOR_ENDPOINT),
        )
    }

    pub fn new(api_endpoint: &str, color_endpoint: &str) -> Self {
        Self {
            api_endpoint: api_endpoint.trim().trim_end_matches('/').to_string(),
            color_endpoint: color_endpoint.trim().to_string(),
        }
    }

    /// WebSocket URL of the Socket.IO endpoint on the API host.
    pub fn live_url(&self) -> String {
        let base = if let Some(rest) = self.api_endpoint.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.api_endpoint.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.api_endpoint.clone()
        };
        format!("{base}/socket.io/?EIO=4&transport=websocket")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = AppConfig::new("https://api.example.com/", "/color");
        assert_eq!(config.api_endpoint, "https://api.example.com");
    }

    #[test]
    fn live_url_switches_scheme() {
        let secure = AppConfig::new("https://api.example.com", "/color");
        assert_eq!(
            secure.live_url(),
            "wss://api.example.com/socket.io/?EIO=4&transport=websocket"
        );

        let plain = AppConfig::new("http://localhost:4000", "/color");
        assert_eq!(
            plain.live_url(),
            "ws://localhost:4000/socket.io/?EIO=4&transport=websocket"
        );
    }
}
