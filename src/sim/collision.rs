//! Projectile/target collision resolution
//!
//! Each projectile claims at most one target per tick and each target can be
//! claimed by at most one projectile. Projectiles are scanned in store order
//! and take the first unclaimed target (in store order) they overlap.

use super::state::{EntityId, Projectile, Target};

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Projectiles that hit something, in store order
    pub hit_projectiles: Vec<EntityId>,
    /// Targets that were hit, in the order they were claimed
    pub hit_targets: Vec<EntityId>,
}

impl CollisionResult {
    /// Number of matched projectile/target pairs
    pub fn pairs_resolved(&self) -> usize {
        self.hit_projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hit_projectiles.is_empty()
    }

    pub fn hit_projectile(&self, id: EntityId) -> bool {
        self.hit_projectiles.contains(&id)
    }

    pub fn hit_target(&self, id: EntityId) -> bool {
        self.hit_targets.contains(&id)
    }
}

/// Match overlapping projectile/target pairs without reusing either side
pub fn resolve(projectiles: &[Projectile], targets: &[Target]) -> CollisionResult {
    let mut claimed = vec![false; targets.len()];
    let mut result = CollisionResult::default();

    for projectile in projectiles {
        let hit = targets
            .iter()
            .enumerate()
            .find(|(i, target)| !claimed[*i] && projectile.bounds.overlaps(&target.bounds));

        if let Some((i, target)) = hit {
            claimed[i] = true;
            result.hit_projectiles.push(projectile.id);
            result.hit_targets.push(target.id);
        }
    }

    result
}
