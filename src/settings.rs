//! Game settings
//!
//! Fixed at startup: validated once, then moved into the simulation.
//! Optionally loaded from a JSON file; missing fields use the defaults
//! from [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Startup configuration for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal displacement per tick while a direction is held
    pub player_speed: f32,
    /// Gap between the player's bottom edge and the screen bottom
    pub player_margin: f32,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    /// Upward displacement per tick
    pub projectile_speed: f32,

    // === Targets ===
    /// Targets are square
    pub target_size: f32,
    /// Downward displacement per tick
    pub target_speed: f32,
    /// Minimum simulated time between spawns, in milliseconds
    pub spawn_interval_ms: u64,

    // === Scoring / pacing ===
    pub hit_score: u64,
    pub target_fps: u32,

    /// Spawner RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_margin: PLAYER_MARGIN,

            projectile_width: BULLET_SIZE,
            projectile_height: BULLET_SIZE,
            projectile_speed: BULLET_SPEED,

            target_size: TARGET_SIZE,
            target_speed: TARGET_SPEED,
            spawn_interval_ms: TARGET_SPAWN_MS,

            hit_score: HIT_SCORE,
            target_fps: TARGET_FPS,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the simulation cannot run with.
    ///
    /// Values are never clamped: the first problem found is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("target_size", self.target_size),
            ("target_speed", self.target_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !self.player_margin.is_finite() || self.player_margin < 0.0 {
            return Err(ConfigError::Negative {
                field: "player_margin",
                value: self.player_margin,
            });
        }

        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::Zero {
                field: "spawn_interval_ms",
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Zero { field: "target_fps" });
        }

        if self.player_width > self.screen_width {
            return Err(ConfigError::DoesNotFit {
                what: "player_width",
                axis: "width",
                size: self.player_width,
                screen: self.screen_width,
            });
        }
        if self.player_height + self.player_margin > self.screen_height {
            return Err(ConfigError::DoesNotFit {
                what: "player_height + player_margin",
                axis: "height",
                size: self.player_height + self.player_margin,
                screen: self.screen_height,
            });
        }
        if self.target_size > self.screen_width {
            return Err(ConfigError::DoesNotFit {
                what: "target_size",
                axis: "width",
                size: self.target_size,
                screen: self.screen_width,
            });
        }

        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Minimum wall time between two frames
    pub fn frame_budget(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps.max(1)))
    }
}
