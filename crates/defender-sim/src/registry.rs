//! Entity registry — owns all live entities and their lifecycle.
//!
//! Wraps the hecs world behind spawn factories and the two lifecycle
//! transitions: `soft_kill` (interactive -> cosmetic, exactly once) and
//! `destroy` (permanent removal). Operating on an id that is no longer
//! present is a logged no-op; races between sweeps and deferred timers
//! are expected and benign.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use defender_core::components::*;
use defender_core::constants::*;
use defender_core::enums::{EntityKind, SizeClass};
use defender_core::types::{Position, Velocity};

/// Registry of live entities. Systems query through `world_mut` and route
/// removals through `destroy`, using the reusable despawn buffer when
/// removing while an iteration is in progress.
pub struct Registry {
    world: World,
    despawn_buffer: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            despawn_buffer: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Remove every entity. Used on scene entry.
    pub fn clear(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
    }

    /// Spawn the player ship at the session start position.
    pub fn spawn_player(&mut self) -> Entity {
        self.world.spawn((
            Player,
            Position::new(PLAYER_START_X, PLAYER_START_Y),
            Velocity::default(),
            Bounds {
                half_w: PLAYER_HALF_WIDTH,
                half_h: PLAYER_HALF_HEIGHT,
            },
            Lifecycle::default(),
            PlayerState::new(PLAYER_START_INTEGRITY),
        ))
    }

    /// Spawn one obstacle with randomized parameters: uniform horizontal
    /// position within the spawn margins, uniform size class, fall speed
    /// from the class range, uniform symmetric angular velocity.
    pub fn spawn_obstacle(&mut self, rng: &mut ChaCha8Rng) -> Entity {
        let x = rng.gen_range(SPAWN_MARGIN..=FIELD_WIDTH - SPAWN_MARGIN);
        let size = if rng.gen_range(0..2) == 0 {
            SizeClass::Small
        } else {
            SizeClass::Large
        };
        let (lo, hi) = match size {
            SizeClass::Small => SMALL_FALL_SPEED,
            SizeClass::Large => LARGE_FALL_SPEED,
        };
        let fall_speed = rng.gen_range(lo..=hi);
        let angular_velocity = rng.gen_range(-OBSTACLE_MAX_SPIN..=OBSTACLE_MAX_SPIN);

        self.spawn_obstacle_with(
            Position::new(x, SPAWN_START_Y),
            Velocity::new(0.0, fall_speed),
            size,
            angular_velocity,
        )
    }

    /// Spawn an obstacle with explicit parameters.
    pub fn spawn_obstacle_with(
        &mut self,
        position: Position,
        velocity: Velocity,
        size: SizeClass,
        angular_velocity: f64,
    ) -> Entity {
        let half = match size {
            SizeClass::Small => SMALL_HALF_EXTENT,
            SizeClass::Large => LARGE_HALF_EXTENT,
        };
        self.world.spawn((
            Obstacle,
            position,
            velocity,
            Bounds {
                half_w: half,
                half_h: half,
            },
            ObstacleClass { size },
            Spin {
                angular_velocity,
                angle: 0.0,
            },
            Lifecycle::default(),
        ))
    }

    /// Spawn a projectile travelling straight up from the given position.
    pub fn spawn_projectile(&mut self, position: Position) -> Entity {
        self.world.spawn((
            Projectile,
            position,
            Velocity::new(0.0, -PROJECTILE_SPEED),
            Bounds {
                half_w: PROJECTILE_HALF_WIDTH,
                half_h: PROJECTILE_HALF_HEIGHT,
            },
            Lifecycle::default(),
        ))
    }

    /// Spawn a cosmetic explosion effect. Effects carry no velocity or
    /// bounds — they never move and never participate in collision queries.
    pub fn spawn_effect(&mut self, position: Position, now_ms: f64) -> Entity {
        self.world.spawn((
            Effect,
            position,
            EffectTtl {
                expires_at_ms: now_ms + EFFECT_DURATION_MS,
            },
            Lifecycle::default(),
        ))
    }

    /// Soft-kill: mark the entity non-interactive while deferred effects
    /// play out. Idempotent — returns whether this call performed the
    /// active -> inactive transition.
    pub fn soft_kill(&mut self, entity: Entity) -> bool {
        match self.world.get::<&mut Lifecycle>(entity) {
            Ok(mut lifecycle) => {
                if lifecycle.active {
                    lifecycle.active = false;
                    true
                } else {
                    false
                }
            }
            Err(_) => {
                log::debug!("soft_kill on unknown entity {entity:?}");
                false
            }
        }
    }

    /// The kind tag of an entity, for hosts resolving a bare id back to a
    /// drawable thing. Kind never changes after creation.
    pub fn kind_of(&self, entity: Entity) -> Option<EntityKind> {
        if self.world.get::<&Obstacle>(entity).is_ok() {
            Some(EntityKind::Obstacle)
        } else if self.world.get::<&Projectile>(entity).is_ok() {
            Some(EntityKind::Projectile)
        } else if self.world.get::<&Effect>(entity).is_ok() {
            Some(EntityKind::Effect)
        } else if self.world.get::<&Player>(entity).is_ok() {
            Some(EntityKind::Player)
        } else {
            None
        }
    }

    /// Whether the entity exists and is still interactive.
    pub fn is_active(&self, entity: Entity) -> bool {
        self.world
            .get::<&Lifecycle>(entity)
            .map(|lifecycle| lifecycle.active)
            .unwrap_or(false)
    }

    /// Permanently remove an entity. Unknown ids are a logged no-op —
    /// the sweep and a deferred destroy timer may both claim an entity.
    pub fn destroy(&mut self, entity: Entity) {
        if self.world.despawn(entity).is_err() {
            log::debug!("destroy on unknown entity {entity:?}");
        }
    }

    /// Take the reusable despawn buffer for a removal-during-iteration pass.
    /// Callers collect entities while iterating, destroy them afterwards,
    /// and hand the buffer back via `restore_despawn_buffer`.
    pub fn take_despawn_buffer(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.despawn_buffer)
    }

    pub fn restore_despawn_buffer(&mut self, mut buffer: Vec<Entity>) {
        buffer.clear();
        self.despawn_buffer = buffer;
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
