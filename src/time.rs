//! Wall-clock time and the frame-driven timers built on it.
//!
//! `draw_web()` runs at ~60fps. Economy ticks and autosaves happen far less
//! often, so each is a timer polled once per frame with the current time.

/// Seconds since the Unix epoch. Wall-clock rather than monotonic because the
/// tick base has to make sense next to timestamps in a save.
#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Decides when the next economy tick is due. The tick itself measures the
/// real elapsed time, so a late tick (tab in background) pays for the whole
/// gap instead of dropping it.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    interval_secs: f64,
}

impl TickClock {
    pub fn new(interval_secs: f64) -> Self {
        Self { interval_secs }
    }

    /// True when `interval_secs` have passed since `last_tick`, or the clock
    /// went backwards (the tick re-bases `last_tick` to now).
    pub fn is_due(&self, last_tick: f64, now: f64) -> bool {
        let elapsed = now - last_tick;
        !elapsed.is_finite() || elapsed < 0.0 || elapsed >= self.interval_secs
    }
}

/// Fires every `interval_secs`. Polling after a long gap fires once, not
/// once per missed interval.
#[derive(Clone, Copy, Debug)]
pub struct AutosaveTimer {
    interval_secs: f64,
    last_fired: f64,
}

impl AutosaveTimer {
    pub fn new(interval_secs: f64, now: f64) -> Self {
        Self {
            interval_secs,
            last_fired: now,
        }
    }

    pub fn is_due(&mut self, now: f64) -> bool {
        if now - self.last_fired >= self.interval_secs || now < self.last_fired {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}
