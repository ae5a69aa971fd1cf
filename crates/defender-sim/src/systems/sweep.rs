//! Lifecycle sweeper — removes entities that leave the playable bounds or
//! outlive their cosmetic duration.

use defender_core::components::{Bounds, Effect, EffectTtl, Obstacle, Projectile};
use defender_core::constants::{FIELD_HEIGHT, OFFSCREEN_MARGIN};
use defender_core::types::Position;

use crate::registry::Registry;

/// Sweep the world once. Uses the registry's reusable despawn buffer to
/// tolerate removal during iteration.
pub fn run(registry: &mut Registry, now_ms: f64) {
    let mut doomed = registry.take_despawn_buffer();

    // Obstacles past the lower bound are removed unconditionally,
    // independent of any soft-kill state.
    for (entity, (pos, _obstacle)) in registry.world_mut().query_mut::<(&Position, &Obstacle)>() {
        if pos.y > FIELD_HEIGHT + OFFSCREEN_MARGIN {
            doomed.push(entity);
        }
    }

    // Projectiles die on leaving the top of the field.
    for (entity, (pos, bounds, _projectile)) in registry
        .world_mut()
        .query_mut::<(&Position, &Bounds, &Projectile)>()
    {
        if pos.y + bounds.half_h < -OFFSCREEN_MARGIN {
            doomed.push(entity);
        }
    }

    // Effects self-terminate after their fixed duration.
    for (entity, (ttl, _effect)) in registry.world_mut().query_mut::<(&EffectTtl, &Effect)>() {
        if now_ms >= ttl.expires_at_ms {
            doomed.push(entity);
        }
    }

    for entity in doomed.drain(..) {
        registry.destroy(entity);
    }
    registry.restore_despawn_buffer(doomed);
}
