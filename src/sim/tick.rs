//! Simulation step
//!
//! One call to [`tick`] runs the whole pipeline in a fixed order:
//! input, player, projectiles, spawning, targets, collisions, score, cull.
//! Collisions run against this tick's positions and before culling, so an
//! entity leaving the screen still gets its last chance to hit.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision;
use super::state::{EntityId, SimPhase, SimState};

/// Control signals for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Stop after this tick
    pub quit: bool,
    /// Held (level-triggered)
    pub move_left: bool,
    /// Held (level-triggered)
    pub move_right: bool,
    /// Fresh fire presses since the previous poll (edge-triggered)
    pub fire_presses: u32,
}

/// Owned copy of everything the presentation sink draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub player: Aabb,
    pub projectiles: Vec<Aabb>,
    pub targets: Vec<Aabb>,
    pub score: u64,
}

impl Snapshot {
    pub fn capture(state: &SimState) -> Self {
        Self {
            tick: state.time_ticks,
            player: state.entities.player.bounds,
            projectiles: state.entities.projectiles.boxes(),
            targets: state.entities.targets.boxes(),
            score: state.score,
        }
    }
}

/// Per-tick bookkeeping, mostly for tests and logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub fired: u32,
    pub spawned: Option<EntityId>,
    pub pairs_resolved: usize,
    pub culled_projectiles: usize,
    pub culled_targets: usize,
}

/// Advance the simulation by one tick of `elapsed` simulated time
pub fn tick(state: &mut SimState, input: &TickInput, elapsed: Duration) -> Snapshot {
    step(state, input, elapsed);
    Snapshot::capture(state)
}

/// [`tick`] without the snapshot copy
pub fn step(state: &mut SimState, input: &TickInput, elapsed: Duration) -> TickReport {
    let mut report = TickReport::default();

    if state.phase == SimPhase::Stopped {
        return report;
    }

    // 1. Input
    if input.quit {
        state.phase = SimPhase::Stopped;
        log::info!(
            "Quit requested at tick {} (score {})",
            state.time_ticks,
            state.score
        );
    }

    state.time_ticks += 1;
    state.now += elapsed;

    let settings = &state.settings;
    let entities = &mut state.entities;

    // 2. Player
    entities
        .player
        .steer(input.move_left, input.move_right, settings.screen_width);

    // 3. Fire
    for _ in 0..input.fire_presses {
        let muzzle = entities
            .player
            .muzzle(settings.projectile_width, settings.projectile_height);
        entities.spawn_projectile(muzzle);
    }
    report.fired = input.fire_presses;

    // 4. Projectiles
    let projectile_step = state.projectile_step();
    state
        .entities
        .projectiles
        .update_all(|b| b.translated(projectile_step));

    // 5. Spawn
    if let Some(bounds) = state.spawner.maybe_spawn(
        state.now,
        state.settings.screen_width,
        state.settings.target_size,
        &mut state.rng,
    ) {
        let id = state.entities.spawn_target(bounds);
        log::debug!("Spawned target {:?} at x={}", id, bounds.left());
        report.spawned = Some(id);
    }

    // 6. Targets
    let target_step = state.target_step();
    state
        .entities
        .targets
        .update_all(|b| b.translated(target_step));

    // 7. Collisions and score
    let hits = collision::resolve(
        state.entities.projectiles.as_slice(),
        state.entities.targets.as_slice(),
    );
    if !hits.is_empty() {
        let hit_projectiles: HashSet<EntityId> = hits.hit_projectiles.iter().copied().collect();
        let hit_targets: HashSet<EntityId> = hits.hit_targets.iter().copied().collect();
        state
            .entities
            .projectiles
            .remove_if(|p| hit_projectiles.contains(&p.id));
        state
            .entities
            .targets
            .remove_if(|t| hit_targets.contains(&t.id));

        let pairs = hits.pairs_resolved() as u64;
        state.pairs_resolved += pairs;
        state.score += pairs * state.settings.hit_score;
        log::debug!(
            "Tick {}: {} hit(s), score {}",
            state.time_ticks,
            pairs,
            state.score
        );
    }
    report.pairs_resolved = hits.pairs_resolved();

    // 8. Cull anything entirely off-screen
    let screen_height = state.settings.screen_height;
    report.culled_projectiles = state
        .entities
        .projectiles
        .remove_if(|p| p.bounds.bottom() <= 0.0);
    report.culled_targets = state
        .entities
        .targets
        .remove_if(|t| t.bounds.top() >= screen_height);

    log::trace!(
        "Tick {}: {} projectiles, {} targets",
        state.time_ticks,
        state.entities.projectiles.len(),
        state.entities.targets.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Projectile, Target};

    /// Roughly one frame at 60 FPS
    const FRAME: Duration = Duration::from_millis(16);

    fn new_state() -> SimState {
        SimState::new(Settings::default()).unwrap()
    }

    fn fire() -> TickInput {
        TickInput {
            fire_presses: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_spawns_projectile_at_muzzle() {
        let mut state = new_state();
        let player = state.entities.player.bounds;

        let muzzle = state.entities.player.muzzle(10.0, 10.0);
        assert_eq!(muzzle.left(), player.center_x() - 5.0);
        assert_eq!(muzzle.top(), player.top());

        // Spawned at the muzzle, then moved up by one step in the same tick
        let snapshot = tick(&mut state, &fire(), Duration::ZERO);
        assert_eq!(snapshot.projectiles.len(), 1);
        assert_eq!(snapshot.projectiles[0].left(), 395.0);
        assert_eq!(snapshot.projectiles[0].top(), player.top() - 10.0);
    }

    #[test]
    fn test_multiple_fire_presses_in_one_tick() {
        let mut state = new_state();
        let input = TickInput {
            fire_presses: 3,
            ..Default::default()
        };
        let snapshot = tick(&mut state, &input, FRAME);
        assert_eq!(snapshot.projectiles.len(), 3);
    }

    #[test]
    fn test_held_direction_moves_player() {
        let mut state = new_state();
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        let snapshot = tick(&mut state, &input, FRAME);
        assert_eq!(snapshot.player.left(), 370.0);
    }

    #[test]
    fn test_target_falls_by_speed_per_tick() {
        let mut state = new_state();
        // Exactly one interval of simulated time: spawn and first fall on tick 1
        let first = tick(&mut state, &TickInput::default(), Duration::from_secs(1));
        assert_eq!(first.targets.len(), 1);
        assert_eq!(first.targets[0].top(), -40.0 + 3.0);

        for k in 2..=20u32 {
            let snapshot = tick(&mut state, &TickInput::default(), Duration::from_millis(1));
            assert_eq!(snapshot.targets[0].top(), -40.0 + k as f32 * 3.0);
        }
    }

    #[test]
    fn test_collision_removes_both_and_scores() {
        let mut state = new_state();
        // Park a target right above the muzzle; one projectile step reaches it
        let player = state.entities.player.bounds;
        state.entities.spawn_target(Aabb::new(
            player.center_x() - 20.0,
            player.top() - 45.0,
            40.0,
            40.0,
        ));

        let snapshot = tick(&mut state, &fire(), FRAME);
        assert!(snapshot.projectiles.is_empty());
        assert!(snapshot.targets.is_empty());
        assert_eq!(snapshot.score, 10);
        assert_eq!(state.pairs_resolved, 1);
    }

    #[test]
    fn test_one_projectile_two_targets_scores_once() {
        let mut state = new_state();
        let player = state.entities.player.bounds;
        let x = player.center_x() - 20.0;
        state
            .entities
            .spawn_target(Aabb::new(x, player.top() - 45.0, 40.0, 40.0));
        state
            .entities
            .spawn_target(Aabb::new(x, player.top() - 44.0, 40.0, 40.0));

        let snapshot = tick(&mut state, &fire(), FRAME);
        assert_eq!(snapshot.score, 10);
        assert_eq!(snapshot.targets.len(), 1);
        assert!(snapshot.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_culled_after_leaving_top() {
        let mut state = new_state();
        state.entities.projectiles.insert(Projectile {
            id: EntityId(1000),
            bounds: Aabb::new(100.0, 0.0, 10.0, 10.0),
        });
        // Bottom edge lands exactly on 0: entirely off-screen
        let snapshot = tick(&mut state, &TickInput::default(), FRAME);
        assert!(snapshot.projectiles.is_empty());
    }

    #[test]
    fn test_target_culled_after_leaving_bottom() {
        let mut state = new_state();
        state.entities.targets.insert(Target {
            id: EntityId(1000),
            bounds: Aabb::new(100.0, 596.0, 40.0, 40.0),
        });
        let snapshot = tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(snapshot.targets.len(), 1);
        let snapshot = tick(&mut state, &TickInput::default(), FRAME);
        assert!(snapshot.targets.is_empty());
    }

    #[test]
    fn test_last_chance_hit_before_cull() {
        // The projectile leaves the screen this tick, but it hits first
        let mut state = new_state();
        state.entities.projectiles.insert(Projectile {
            id: EntityId(1000),
            bounds: Aabb::new(100.0, 0.0, 10.0, 10.0),
        });
        state.entities.targets.insert(Target {
            id: EntityId(1001),
            bounds: Aabb::new(95.0, -45.0, 40.0, 40.0),
        });
        let snapshot = tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(snapshot.score, 10);
        assert!(snapshot.projectiles.is_empty());
        assert!(snapshot.targets.is_empty());
    }

    #[test]
    fn test_quit_finishes_tick_then_stops() {
        let mut state = new_state();
        let input = TickInput {
            quit: true,
            move_right: true,
            ..Default::default()
        };
        let snapshot = tick(&mut state, &input, FRAME);
        assert_eq!(state.phase, SimPhase::Stopped);
        assert_eq!(snapshot.player.left(), 380.0);
        assert_eq!(snapshot.tick, 1);

        // Stopped is terminal: further ticks change nothing
        let after = tick(&mut state, &fire(), Duration::from_secs(5));
        assert_eq!(after, snapshot);
        assert!(!state.is_running());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            fire(),
            TickInput {
                move_right: true,
                fire_presses: 2,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut state1 = new_state();
        let mut state2 = new_state();
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            let a = tick(&mut state1, input, Duration::from_millis(17));
            let b = tick(&mut state2, input, Duration::from_millis(17));
            assert_eq!(a, b);
        }
        assert_eq!(state1.score, state2.score);
    }
}
