use std::time::Duration;

/// Wall-clock stopwatch that works in the browser, where `Instant` panics.
pub struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    started_at: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    started_at_ms: f64,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            started_at: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            started_at_ms: js_sys::Date::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.started_at.elapsed()
        }
        #[cfg(target_arch = "wasm32")]
        {
            let delta = (js_sys::Date::now() - self.started_at_ms).max(0.0);
            Duration::from_millis(delta as u64)
        }
    }
}

#[inline]
pub fn log_perf(scope: &str, started_at: &Stopwatch, details: &str) {
    let elapsed_ms = started_at.elapsed().as_millis() as u64;
    if details.trim().is_empty() {
        tracing::debug!(scope, elapsed_ms, "perf");
    } else {
        tracing::debug!(scope, elapsed_ms, details, "perf");
    }
}
