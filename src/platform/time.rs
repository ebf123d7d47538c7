//! Frame timing
//!
//! Turns animation-frame timestamps into clamped simulation deltas.

use crate::consts::{FRAME_MS, MAX_FRAME_MS};

/// Tracks the previous frame timestamp and yields clamped deltas (ms)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_MS)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_time: None,
            max_dt,
        }
    }

    /// Delta since the previous call in milliseconds.
    ///
    /// The first frame yields one nominal frame unit. Backwards or huge jumps
    /// (tab refocus) are clamped to `[0, max_dt]`.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last) as f32,
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (after resume or restart)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}
