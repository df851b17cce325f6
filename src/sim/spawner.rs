//! Time-driven target spawning

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Emits at most one target per `interval` of simulated time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub interval: Duration,
    /// Simulated time of the last spawn (run start until the first one)
    pub last_spawn: Duration,
}

impl Spawner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_spawn: Duration::ZERO,
        }
    }

    /// Spawn a target if a full interval has passed since the last one.
    ///
    /// The timer restarts at `now` rather than advancing by one interval,
    /// so a long stall yields a single spawn instead of a burst.
    pub fn maybe_spawn(
        &mut self,
        now: Duration,
        screen_width: f32,
        target_size: f32,
        rng: &mut impl Rng,
    ) -> Option<Aabb> {
        if now.saturating_sub(self.last_spawn) < self.interval {
            return None;
        }
        self.last_spawn = now;

        let max_x = (screen_width - target_size).max(0.0);
        let x = rng.random_range(0.0..=max_x);
        Some(Aabb::new(x, -target_size, target_size, target_size))
    }
}
