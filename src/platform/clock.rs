//! Frame timing
//!
//! Hosts hand over a millisecond timestamp each frame (the value a browser
//! passes to `requestAnimationFrame`, or any monotonic clock). The simulation
//! wants elapsed seconds.

/// Turns successive frame timestamps into elapsed seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; zero on the first call after a reset
    ///
    /// A timestamp earlier than the last one yields zero rather than running
    /// the simulation backwards.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let then = self.last_time.replace(now_ms).unwrap_or(now_ms);
        ((now_ms - then) / 1000.0).max(0.0) as f32
    }

    /// Forget the last timestamp, so time spent away isn't replayed
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}
