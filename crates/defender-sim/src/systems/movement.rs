//! Kinematic integration system.
//!
//! Stands in for the external arcade-physics collaborator: integrates
//! position from velocity, advances cosmetic spin, and clamps the player
//! to the field. Entities without a Velocity component (effects) are
//! skipped by the query itself.

use hecs::World;

use defender_core::components::{Bounds, Player, Spin};
use defender_core::constants::FIELD_WIDTH;
use defender_core::types::{Position, Velocity};

/// Integrate all movable entities by `dt_secs`.
pub fn run(world: &mut World, dt_secs: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * dt_secs;
        pos.y += vel.y * dt_secs;
    }

    for (_entity, spin) in world.query_mut::<&mut Spin>() {
        spin.angle = (spin.angle + spin.angular_velocity * dt_secs) % 360.0;
    }

    // World-bounds clamp applies to the player only; obstacles and
    // projectiles are allowed to leave the field and get swept.
    for (_entity, (pos, bounds, _player)) in
        world.query_mut::<(&mut Position, &Bounds, &Player)>()
    {
        pos.x = pos.x.clamp(bounds.half_w, FIELD_WIDTH - bounds.half_w);
    }
}
