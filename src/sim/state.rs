//! Simulation state and the entity store
//!
//! Everything a tick reads or writes lives in [`SimState`]; there are no
//! globals. Entities are addressed by [`EntityId`], never by value.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::spawner::Spawner;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Run state of the loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Running,
    Stopped,
}

/// Stable handle for a projectile or target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Anything stored in an [`EntityList`]
pub trait Entity {
    fn id(&self) -> EntityId;
    fn bounds(&self) -> Aabb;
    fn set_bounds(&mut self, bounds: Aabb);
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    /// Horizontal displacement per tick
    pub speed: f32,
}

impl Player {
    /// Horizontally centered, resting `margin` above the bottom of the screen
    pub fn new(settings: &Settings) -> Self {
        let x = (settings.screen_width - settings.player_width) / 2.0;
        let y = settings.screen_height - settings.player_height - settings.player_margin;
        Self {
            bounds: Aabb::new(x, y, settings.player_width, settings.player_height),
            speed: settings.player_speed,
        }
    }

    /// Move by one step per held direction and clamp to `[0, screen_width - width]`
    pub fn steer(&mut self, move_left: bool, move_right: bool, screen_width: f32) {
        let mut dx = 0.0;
        if move_left {
            dx -= self.speed;
        }
        if move_right {
            dx += self.speed;
        }
        let max_x = screen_width - self.bounds.width();
        self.bounds.pos.x = (self.bounds.pos.x + dx).clamp(0.0, max_x);
    }

    /// Spawn box for a new projectile: centered on the ship, at its top edge
    pub fn muzzle(&self, width: f32, height: f32) -> Aabb {
        Aabb::new(
            self.bounds.center_x() - width / 2.0,
            self.bounds.top(),
            width,
            height,
        )
    }
}

/// A shot travelling up the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub bounds: Aabb,
}

/// A falling target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    pub bounds: Aabb,
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = bounds;
    }
}

impl Entity for Target {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = bounds;
    }
}

/// Ordered collection of one entity kind.
///
/// Insertion order is preserved through updates and removals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the end
    pub fn insert(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Replace every box with `f(box)`
    pub fn update_all(&mut self, mut f: impl FnMut(Aabb) -> Aabb) {
        for entity in &mut self.items {
            let next = f(entity.bounds());
            entity.set_bounds(next);
        }
    }

    /// Drop every entity matching `predicate` in one pass; survivors keep their order
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|e| !predicate(e));
        before - self.items.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of every box, in store order
    pub fn boxes(&self) -> Vec<Aabb> {
        self.items.iter().map(Entity::bounds).collect()
    }
}

/// Owner of every live entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entities {
    pub player: Player,
    pub projectiles: EntityList<Projectile>,
    pub targets: EntityList<Target>,
    next_id: u32,
}

impl Entities {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            projectiles: EntityList::new(),
            targets: EntityList::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_projectile(&mut self, bounds: Aabb) -> EntityId {
        let id = self.next_entity_id();
        self.projectiles.insert(Projectile { id, bounds });
        id
    }

    pub fn spawn_target(&mut self, bounds: Aabb) -> EntityId {
        let id = self.next_entity_id();
        self.targets.insert(Target { id, bounds });
        id
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Validated, fixed for the whole run
    pub settings: Settings,
    pub entities: Entities,
    pub spawner: Spawner,
    /// Spawner RNG
    pub rng: Pcg32,
    pub score: u64,
    /// Collision pairs resolved since the start of the run
    pub pairs_resolved: u64,
    /// Completed ticks
    pub time_ticks: u64,
    /// Simulated time: sum of every elapsed duration fed to `tick`
    pub now: Duration,
    pub phase: SimPhase,
}

impl SimState {
    /// Validate `settings` and set up a fresh run
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let player = Player::new(&settings);
        let spawner = Spawner::new(settings.spawn_interval());
        let rng = Pcg32::seed_from_u64(settings.seed);

        log::info!(
            "New run: screen {}x{}, seed {}, spawn every {:?}",
            settings.screen_width,
            settings.screen_height,
            settings.seed,
            settings.spawn_interval()
        );

        Ok(Self {
            entities: Entities::new(player),
            spawner,
            rng,
            score: 0,
            pairs_resolved: 0,
            time_ticks: 0,
            now: Duration::ZERO,
            phase: SimPhase::Running,
            settings,
        })
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// Per-tick displacement applied to projectiles
    pub fn projectile_step(&self) -> Vec2 {
        Vec2::new(0.0, -self.settings.projectile_speed)
    }

    /// Per-tick displacement applied to targets
    pub fn target_step(&self) -> Vec2 {
        Vec2::new(0.0, self.settings.target_speed)
    }
}
