//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick displacement, spawning driven by simulated time only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, entities addressed by ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

#[cfg(test)]
mod properties;

pub use aabb::Aabb;
pub use collision::{CollisionResult, resolve};
pub use spawner::Spawner;
pub use state::{
    Entities, Entity, EntityId, EntityList, Player, Projectile, SimPhase, SimState, Target,
};
pub use tick::{Snapshot, TickInput, TickReport, step, tick};
