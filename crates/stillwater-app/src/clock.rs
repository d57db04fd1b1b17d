//! Frame clock with variable timestep

use std::time::Instant;

/// Tracks total elapsed time and per-frame delta time
pub struct GameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Clamp pathological frame times (debugger pauses, window drags)
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
    }
}
