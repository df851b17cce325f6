//! Orbit Defender - a fixed-tick arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, scoring)
//! - `platform`: Frame pacing and input capture
//! - `renderer`: Presentation sinks that consume post-tick snapshots
//! - `game`: Outer loop tying the above together
//! - `settings`: Validated startup configuration

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GameError, InputError, PresentError};
pub use game::{Game, RunSummary};
pub use settings::Settings;

/// Default game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the ship's bottom edge and the screen bottom
    pub const PLAYER_MARGIN: f32 = 10.0;

    /// Projectiles (pixels per tick, upward)
    pub const BULLET_SIZE: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Targets (pixels per tick, downward)
    pub const TARGET_SIZE: f32 = 40.0;
    pub const TARGET_SPEED: f32 = 3.0;
    /// Minimum simulated time between two spawns
    pub const TARGET_SPAWN_MS: u64 = 1000;

    /// Points per destroyed target
    pub const HIT_SCORE: u64 = 10;

    /// Frame rate cap
    pub const TARGET_FPS: u32 = 60;

    /// Default spawner seed
    pub const DEFAULT_SEED: u64 = 0x0DEF_E4DE;
}
