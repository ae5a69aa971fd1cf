//! Snapshot system: queries the world and builds a complete FrameSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use defender_core::components::*;
use defender_core::enums::ScenePhase;
use defender_core::events::VisualEvent;
use defender_core::state::*;
use defender_core::types::{Position, SimTime, Velocity};

/// Build a complete FrameSnapshot from the current world state.
pub fn build(
    world: &World,
    time: &SimTime,
    phase: ScenePhase,
    score: u32,
    elapsed_ms: f64,
    events: Vec<VisualEvent>,
) -> FrameSnapshot {
    let player = build_player(world);
    let integrity = player.as_ref().map(|_| player_integrity(world)).unwrap_or(0);

    FrameSnapshot {
        time: *time,
        phase,
        session: SessionView {
            score,
            elapsed_ms,
            integrity,
        },
        player,
        obstacles: build_obstacles(world),
        projectiles: build_projectiles(world),
        effects: build_effects(world),
        events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Position, &Velocity, &PlayerState, &Player)>()
        .iter()
        .next()
        .map(|(entity, (pos, vel, state, _))| PlayerView {
            id: entity.to_bits().get(),
            position: *pos,
            velocity: *vel,
            hit: state.hit,
        })
}

fn player_integrity(world: &World) -> u32 {
    world
        .query::<(&PlayerState, &Player)>()
        .iter()
        .next()
        .map(|(_, (state, _))| state.integrity)
        .unwrap_or(0)
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    let mut views: Vec<ObstacleView> = world
        .query::<(&Position, &ObstacleClass, &Spin, &Lifecycle, &Obstacle)>()
        .iter()
        .map(|(entity, (pos, class, spin, lifecycle, _))| ObstacleView {
            id: entity.to_bits().get(),
            position: *pos,
            size: class.size,
            angle: spin.angle,
            active: lifecycle.active,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(entity, (pos, _))| ProjectileView {
            id: entity.to_bits().get(),
            position: *pos,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_effects(world: &World) -> Vec<EffectView> {
    let mut views: Vec<EffectView> = world
        .query::<(&Position, &Effect)>()
        .iter()
        .map(|(entity, (pos, _))| EffectView {
            id: entity.to_bits().get(),
            position: *pos,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}
