//! Collision pairing — reports axis-aligned overlaps between entity groups.
//!
//! Produces at most one pair per combination per tick, only between active
//! entities. Two independent pairing rules: Projectile x Obstacle and
//! Player x Obstacle. Effects never appear here.

use hecs::{Entity, World};

use defender_core::components::{Bounds, Lifecycle, Obstacle, Player, Projectile};
use defender_core::types::Position;

/// A reported overlap between two entities, in pairing-rule order.
#[derive(Debug, Clone, Copy)]
pub enum OverlapPair {
    ProjectileObstacle { projectile: Entity, obstacle: Entity },
    PlayerObstacle { player: Entity, obstacle: Entity },
}

/// Collect all overlap pairs for this tick into `pairs`.
pub fn collect_pairs(world: &World, pairs: &mut Vec<OverlapPair>) {
    let obstacles: Vec<(Entity, Position, Bounds)> = world
        .query::<(&Position, &Bounds, &Lifecycle, &Obstacle)>()
        .iter()
        .filter(|(_, (_, _, lifecycle, _))| lifecycle.active)
        .map(|(entity, (pos, bounds, _, _))| (entity, *pos, *bounds))
        .collect();

    for (projectile, (pos, bounds, lifecycle, _)) in world
        .query::<(&Position, &Bounds, &Lifecycle, &Projectile)>()
        .iter()
    {
        if !lifecycle.active {
            continue;
        }
        for &(obstacle, obstacle_pos, obstacle_bounds) in &obstacles {
            if aabb_overlap(pos, bounds, &obstacle_pos, &obstacle_bounds) {
                pairs.push(OverlapPair::ProjectileObstacle {
                    projectile,
                    obstacle,
                });
            }
        }
    }

    for (player, (pos, bounds, lifecycle, _)) in world
        .query::<(&Position, &Bounds, &Lifecycle, &Player)>()
        .iter()
    {
        if !lifecycle.active {
            continue;
        }
        for &(obstacle, obstacle_pos, obstacle_bounds) in &obstacles {
            if aabb_overlap(pos, bounds, &obstacle_pos, &obstacle_bounds) {
                pairs.push(OverlapPair::PlayerObstacle { player, obstacle });
            }
        }
    }
}

/// Axis-aligned box overlap from center positions and half extents.
fn aabb_overlap(a_pos: &Position, a: &Bounds, b_pos: &Position, b: &Bounds) -> bool {
    (a_pos.x - b_pos.x).abs() <= a.half_w + b.half_w
        && (a_pos.y - b_pos.y).abs() <= a.half_h + b.half_h
}
