//! Combat resolver — turns overlap reports into destruction, damage, and
//! score outcomes.
//!
//! Each pair re-checks that both parties are still active before applying
//! an outcome: an obstacle is consumed by the first qualifying overlap of
//! the tick and excluded from every later pairing by its cleared active
//! flag.

use defender_core::components::{Player, PlayerState};
use defender_core::constants::{KILL_GRACE_DELAY_MS, PLAYER_HIT_DURATION_MS, SCORE_PER_KILL};
use defender_core::events::VisualEvent;
use defender_core::types::Position;

use crate::registry::Registry;
use crate::systems::collision::OverlapPair;
use crate::timers::{TimerAction, TimerQueue};

/// Resolve all overlap pairs for this tick.
pub fn resolve(
    registry: &mut Registry,
    pairs: &[OverlapPair],
    now_ms: f64,
    damage_on_hit: bool,
    score: &mut u32,
    timers: &mut TimerQueue,
    events: &mut Vec<VisualEvent>,
) {
    for pair in pairs {
        match *pair {
            OverlapPair::ProjectileObstacle {
                projectile,
                obstacle,
            } => {
                if !registry.is_active(projectile) || !registry.is_active(obstacle) {
                    continue;
                }
                let impact = match registry.world().get::<&Position>(obstacle) {
                    Ok(pos) => *pos,
                    Err(_) => continue,
                };

                registry.soft_kill(obstacle);
                registry.soft_kill(projectile);
                registry.spawn_effect(impact, now_ms);
                *score += SCORE_PER_KILL;
                events.push(VisualEvent::Explosion {
                    x: impact.x,
                    y: impact.y,
                });

                // The obstacle lingers for its cosmetic aftermath; the
                // projectile has none and goes immediately.
                timers.schedule(now_ms + KILL_GRACE_DELAY_MS, TimerAction::DestroyEntity(obstacle));
                registry.destroy(projectile);
            }
            OverlapPair::PlayerObstacle { player, obstacle } => {
                if !registry.is_active(player) || !registry.is_active(obstacle) {
                    continue;
                }
                let impact = match registry.world().get::<&Position>(obstacle) {
                    Ok(pos) => *pos,
                    Err(_) => continue,
                };

                apply_player_hit(registry, player, now_ms, damage_on_hit);
                timers.schedule(now_ms + PLAYER_HIT_DURATION_MS, TimerAction::ClearPlayerHit);

                registry.soft_kill(obstacle);
                registry.spawn_effect(impact, now_ms);
                events.push(VisualEvent::Explosion {
                    x: impact.x,
                    y: impact.y,
                });
                events.push(VisualEvent::PlayerHit {
                    duration_ms: PLAYER_HIT_DURATION_MS,
                });
                timers.schedule(now_ms + KILL_GRACE_DELAY_MS, TimerAction::DestroyEntity(obstacle));
            }
        }
    }
}

/// Set the transient hit state. A hit that lands inside an existing hit
/// window extends the window without a second integrity decrement.
fn apply_player_hit(registry: &mut Registry, player: hecs::Entity, now_ms: f64, damage_on_hit: bool) {
    if let Ok(mut state) = registry
        .world()
        .get::<&mut PlayerState>(player)
    {
        if damage_on_hit && !state.hit {
            state.integrity = state.integrity.saturating_sub(1);
        }
        state.hit = true;
        state.hit_until_ms = now_ms + PLAYER_HIT_DURATION_MS;
    }
}

/// Clear the hit flag if its window has elapsed. Called when a
/// ClearPlayerHit timer fires; a re-hit that pushed `hit_until_ms`
/// forward makes the stale timer a no-op.
pub fn clear_player_hit(registry: &mut Registry, now_ms: f64) {
    for (_entity, (state, _player)) in registry
        .world_mut()
        .query_mut::<(&mut PlayerState, &Player)>()
    {
        if state.hit && now_ms >= state.hit_until_ms {
            state.hit = false;
        }
    }
}
