/// Game loop timing
///
/// Fixed timestep clock. Every tick of game state (avatar movement, fence and
/// obstacle motion, animation timers) runs at the same fixed rate regardless
/// of how often the host wakes us up.
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second, one tick ≈ 16 ms)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Fixed timestep clock state
pub struct GameLoop {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Total ticks handed out
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            tick_count: 0,
        }
    }

    /// Begin a new frame, returns the number of fixed ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Feed `frame_time` into the accumulator and return how many ticks are due
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop whatever we could not catch up on instead of bursting later
        if ticks == MAX_STEPS_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
