//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::SizeClass;

/// Marks an entity as a falling obstacle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;

/// Marks an entity as a player projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Marks an entity as a transient cosmetic effect.
/// Effects never participate in collision queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Effect;

/// Marks an entity as the player ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Interaction lifecycle state.
///
/// `active` flips true -> false exactly once (soft-kill); an inactive entity
/// no longer matches collision pairing and is awaiting removal. Removal
/// itself is world despawn — an entity is "alive" while it is in the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifecycle {
    pub active: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Axis-aligned bounding extent (half sizes) used for overlap and
/// off-screen tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub half_w: f64,
    pub half_h: f64,
}

/// Obstacle size class payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleClass {
    pub size: SizeClass,
}

/// Cosmetic rotation state for obstacles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spin {
    /// Angular velocity in deg/s.
    pub angular_velocity: f64,
    /// Accumulated angle in degrees, for rendering.
    pub angle: f64,
}

/// Self-termination deadline for effect entities (host ms).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectTtl {
    pub expires_at_ms: f64,
}

/// Player session state: integrity counter and transient hit window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerState {
    /// Integrity counter. Only decremented when damage-on-hit is enabled.
    pub integrity: u32,
    /// Whether the hit (visual invulnerability) flag is currently set.
    pub hit: bool,
    /// Host timestamp at which the hit flag clears. A re-hit pushes this
    /// forward, making any earlier scheduled clear a no-op.
    pub hit_until_ms: f64,
}

impl PlayerState {
    pub fn new(integrity: u32) -> Self {
        Self {
            integrity,
            hit: false,
            hit_until_ms: 0.0,
        }
    }
}
