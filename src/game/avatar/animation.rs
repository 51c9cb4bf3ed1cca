// Avatar animation system

use super::state::Direction;

/// Stepped walk cycle with an independent frame counter per direction.
///
/// Showing a frame locks the cycle for `frame_delay` seconds; while locked no
/// new frame is selected, which gives the gait its stepped look.
#[derive(Debug, Clone)]
pub struct WalkCycle {
    /// Frames per direction
    frame_count: u8,
    /// Next frame to show, indexed by `Direction::index`
    next_frames: [u8; 5],
    /// Seconds a frame stays locked
    frame_delay: f32,
    /// Seconds of lock left
    lock_remaining: f32,
}

impl WalkCycle {
    pub fn new(frame_count: u8, frame_delay: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            next_frames: [0; 5],
            frame_delay,
            lock_remaining: 0.0,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_remaining > 0.0
    }

    /// Take the next frame for `direction` and lock.
    ///
    /// Returns `None` while locked.
    pub fn step(&mut self, direction: Direction) -> Option<u8> {
        if self.is_locked() {
            return None;
        }

        let slot = &mut self.next_frames[direction.index()];
        let frame = *slot;
        *slot = (*slot + 1) % self.frame_count;
        self.lock_remaining = self.frame_delay;
        Some(frame)
    }

    /// Frame that `step` would show next for `direction`
    #[cfg(test)]
    pub fn next_frame(&self, direction: Direction) -> u8 {
        self.next_frames[direction.index()]
    }

    /// Count the lock down (called every tick)
    pub fn update(&mut self, dt: f32) {
        if self.lock_remaining > 0.0 {
            self.lock_remaining = (self.lock_remaining - dt).max(0.0);
        }
    }
}

/// Looping frame animation (the idle phone animation)
#[derive(Debug, Clone)]
pub struct LoopingAnimation {
    frame_count: u8,
    /// Duration of each frame in seconds
    frame_duration: f32,
    current_frame: u8,
    /// Time elapsed in current frame
    frame_timer: f32,
    playing: bool,
}

impl LoopingAnimation {
    pub fn new(frame_count: u8, frame_duration: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_duration,
            current_frame: 0,
            frame_timer: 0.0,
            playing: false,
        }
    }

    /// Start from the first frame
    pub fn play(&mut self) {
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current_frame = 0;
        self.frame_timer = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_frame(&self) -> u8 {
        self.current_frame
    }

    /// Advance the animation. Returns true when the frame changed.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing || self.frame_duration <= 0.0 {
            return false;
        }

        self.frame_timer += dt;
        let mut changed = false;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.current_frame = (self.current_frame + 1) % self.frame_count;
            changed = true;
        }
        changed
    }
}

/// Tracks time since the player last touched the keyboard
#[derive(Debug, Clone)]
pub struct IdleMonitor {
    threshold: f32,
    idle_time: f32,
}

impl IdleMonitor {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            idle_time: 0.0,
        }
    }

    pub fn note_interaction(&mut self) {
        self.idle_time = 0.0;
    }

    /// Accumulate idle time. Returns true on the tick the threshold is crossed.
    pub fn update(&mut self, dt: f32) -> bool {
        let was_idle = self.is_idle();
        self.idle_time += dt;
        !was_idle && self.is_idle()
    }

    pub fn is_idle(&self) -> bool {
        self.idle_time >= self.threshold
    }

    pub fn idle_time(&self) -> f32 {
        self.idle_time
    }
}
