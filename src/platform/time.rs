//! Frame pacing

use std::time::{Duration, Instant};

/// Caps a loop at a target frame rate by sleeping out the rest of each frame
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time budget of one frame at `fps` (zero disables pacing)
    pub fn frame_budget(fps: u32) -> Duration {
        if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        }
    }

    /// Sleep so that at least one frame budget has passed since the previous
    /// tick, then return the time elapsed since that tick
    pub fn tick(&mut self, fps: u32) -> Duration {
        let now = Instant::now();
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return Duration::ZERO;
        };

        let budget = Self::frame_budget(fps);
        let spent = now.duration_since(last);
        if spent < budget {
            std::thread::sleep(budget - spent);
        }

        let now = Instant::now();
        self.last_tick = Some(now);
        now.duration_since(last)
    }
}
