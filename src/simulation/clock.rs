//! Frame clock with a ceiling on the reported delta

use std::time::Instant;

/// Default cap on a single frame's delta, in seconds.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.05;

/// Measures time between frames.
///
/// A stalled frame (backgrounded window, debugger pause) would otherwise show
/// up as one huge delta and make every body jump along its orbit.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    last_timestamp: Option<Instant>,
    max_frame_delta: f32,
}

impl SimulationClock {
    pub fn new(max_frame_delta: f32) -> Self {
        Self {
            last_timestamp: None,
            max_frame_delta,
        }
    }

    pub fn max_frame_delta(&self) -> f32 {
        self.max_frame_delta
    }

    /// Delta since the previous call, measured from now.
    pub fn next_delta(&mut self) -> f32 {
        self.next_delta_at(Instant::now())
    }

    /// Delta since the previous call, measured from `now`.
    ///
    /// The first call reports 0. The result always lies in `[0, max_frame_delta]`.
    pub fn next_delta_at(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last_timestamp.replace(now) else {
            return 0.0;
        };

        let elapsed = now.saturating_duration_since(last).as_secs_f32();
        if elapsed > self.max_frame_delta {
            log::debug!(
                "Frame delta {:.3}s clamped to {:.3}s",
                elapsed,
                self.max_frame_delta
            );
            return self.max_frame_delta;
        }
        elapsed
    }

    /// Forgets the previous timestamp so the next frame reports 0.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DELTA)
    }
}
