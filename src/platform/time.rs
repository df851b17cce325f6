//! Frame pacing
//!
//! [`FrameClock::tick`] is the only place the loop blocks: it sleeps until a
//! full frame budget has passed since the previous call, then reports the
//! time that actually elapsed.

use std::time::{Duration, Instant};

/// Monotonic time plus the ability to wait
pub trait TimeSource {
    /// Time since the source was created
    fn elapsed(&self) -> Duration;
    /// Block for (at least) `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Real time: `Instant` and `thread::sleep`
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven time for tests and headless replays; sleeping advances it
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate work taking `duration`
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
    }
}

/// Caps the loop at one tick per frame budget
#[derive(Debug, Clone)]
pub struct FrameClock<T: TimeSource = WallClock> {
    source: T,
    budget: Duration,
    last: Duration,
    frames: u64,
}

impl<T: TimeSource> FrameClock<T> {
    pub fn new(source: T, budget: Duration) -> Self {
        let last = source.elapsed();
        Self {
            source,
            budget,
            last,
            frames: 0,
        }
    }

    /// Frame rate cap expressed as frames per second
    pub fn with_fps(source: T, fps: u32) -> Self {
        Self::new(
            source,
            Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1))),
        )
    }

    /// Wait out the rest of the frame budget and return the time since the last call
    pub fn tick(&mut self) -> Duration {
        let since_last = self.source.elapsed().saturating_sub(self.last);
        if since_last < self.budget {
            self.source.sleep(self.budget - since_last);
        } else if self.frames > 0 && since_last > self.budget * 2 {
            log::warn!(
                "Frame {} overran its budget: {:?} > {:?}",
                self.frames,
                since_last,
                self.budget
            );
        }

        let now = self.source.elapsed();
        let elapsed = now.saturating_sub(self.last);
        self.last = now;
        self.frames += 1;
        elapsed
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Number of completed `tick` calls
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
