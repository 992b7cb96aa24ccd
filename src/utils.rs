/// Utility helpers for AudioMelody
use chrono::{DateTime, Local};

/// Format a playback position in seconds as `m:ss`.
/// Negative or non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Format a track length given in milliseconds as `m:ss`.
pub fn format_duration_ms(millis: u64) -> String {
    let total = millis / 1000;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render an ISO-8601 timestamp as `dd/mm/yyyy HH:MM` in local time.
/// Unparseable input is returned unchanged.
pub fn format_created_at(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn delay_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
}

/// Show a blocking message to the listener.
#[cfg(target_arch = "wasm32")]
pub fn alert_user(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn alert_user(message: &str) {
    tracing::warn!(%message, "user alert");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_time_handles_bad_input() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn format_duration_from_millis() {
        assert_eq!(format_duration_ms(61_000), "1:01");
        assert_eq!(format_duration_ms(999), "0:00");
    }

    #[test]
    fn created_at_passthrough_on_garbage() {
        assert_eq!(format_created_at("yesterday"), "yesterday");
    }

    #[test]
    fn created_at_uses_day_first_layout() {
        let formatted = format_created_at("2024-03-09T12:00:00Z");
        assert_eq!(formatted.len(), "09/03/2024 12:00".len());
        assert!(formatted.contains("/2024 "));
    }
}
