//! Property tests over long random runs

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;

use super::aabb::Aabb;
use super::collision::resolve;
use super::state::{EntityId, Projectile, SimState, Target};
use super::tick::{TickInput, step};
use crate::settings::Settings;

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), 0u32..3).prop_map(|(move_left, move_right, fire_presses)| {
        TickInput {
            quit: false,
            move_left,
            move_right,
            fire_presses,
        }
    })
}

/// Mostly frame-sized ticks with the occasional multi-second stall
fn elapsed() -> impl Strategy<Value = Duration> {
    prop_oneof![
        8 => (1u64..40).prop_map(Duration::from_millis),
        1 => (1000u64..5000).prop_map(Duration::from_millis),
        1 => Just(Duration::ZERO),
    ]
}

fn fast_spawn_settings(seed: u64) -> Settings {
    Settings {
        seed,
        spawn_interval_ms: 50,
        target_speed: 12.0,
        ..Default::default()
    }
}

fn boxes() -> impl Strategy<Value = Vec<Aabb>> {
    prop::collection::vec(
        (0.0f32..100.0, 0.0f32..100.0, 1.0f32..30.0, 1.0f32..30.0)
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h)),
        0..12,
    )
}

proptest! {
    #[test]
    fn prop_run_invariants(
        seed in any::<u64>(),
        ticks in prop::collection::vec((tick_input(), elapsed()), 1..400),
    ) {
        let mut state = SimState::new(fast_spawn_settings(seed)).unwrap();
        let width = state.settings.screen_width;
        let height = state.settings.screen_height;
        let hit_score = state.settings.hit_score;

        let mut last_score = 0;
        let mut total_pairs = 0u64;
        let mut last_spawn: Option<Duration> = None;

        for (input, dt) in &ticks {
            let report = step(&mut state, input, *dt);
            total_pairs += report.pairs_resolved as u64;

            // Player stays on screen
            let player = state.entities.player.bounds;
            prop_assert!(player.left() >= 0.0);
            prop_assert!(player.right() <= width);

            // Everything retained past the cull is at least partly visible
            for p in state.entities.projectiles.iter() {
                prop_assert!(p.bounds.intersects_screen(width, height), "{:?}", p.bounds);
            }
            for t in state.entities.targets.iter() {
                prop_assert!(t.bounds.intersects_screen(width, height), "{:?}", t.bounds);
            }

            // Score tracks resolved pairs and never decreases
            prop_assert!(state.score >= last_score);
            prop_assert_eq!(state.score, hit_score * total_pairs);
            prop_assert_eq!(state.pairs_resolved, total_pairs);
            last_score = state.score;

            // Spawns are at least one interval apart in simulated time
            if report.spawned.is_some() {
                if let Some(prev) = last_spawn {
                    prop_assert!(state.now - prev >= state.settings.spawn_interval());
                }
                last_spawn = Some(state.now);
            }
        }
    }

    #[test]
    fn prop_resolver_matches_each_entity_once(
        projectile_boxes in boxes(),
        target_boxes in boxes(),
    ) {
        let projectiles: Vec<Projectile> = projectile_boxes
            .into_iter()
            .enumerate()
            .map(|(i, bounds)| Projectile { id: EntityId(i as u32), bounds })
            .collect();
        let targets: Vec<Target> = target_boxes
            .into_iter()
            .enumerate()
            .map(|(i, bounds)| Target { id: EntityId(1000 + i as u32), bounds })
            .collect();

        let result = resolve(&projectiles, &targets);

        let unique_projectiles: HashSet<_> = result.hit_projectiles.iter().collect();
        let unique_targets: HashSet<_> = result.hit_targets.iter().collect();
        prop_assert_eq!(unique_projectiles.len(), result.hit_projectiles.len());
        prop_assert_eq!(unique_targets.len(), result.hit_targets.len());
        prop_assert_eq!(result.hit_projectiles.len(), result.hit_targets.len());

        // Every reported pair really overlaps
        for (pid, tid) in result.hit_projectiles.iter().zip(&result.hit_targets) {
            let p = projectiles.iter().find(|p| p.id == *pid).unwrap();
            let t = targets.iter().find(|t| t.id == *tid).unwrap();
            prop_assert!(p.bounds.overlaps(&t.bounds));
        }

        // A projectile left unmatched overlaps only targets that were claimed
        for p in projectiles.iter().filter(|p| !result.hit_projectile(p.id)) {
            for t in targets.iter().filter(|t| p.bounds.overlaps(&t.bounds)) {
                prop_assert!(result.hit_target(t.id));
            }
        }
    }
}
