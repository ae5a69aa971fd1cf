//! Tests for the simulation engine: determinism, spawn cadence, collision
//! outcomes, lifecycle sweeping, and scene transitions.

use std::collections::HashSet;

use defender_core::commands::{InputState, PlayerCommand};
use defender_core::constants::*;
use defender_core::enums::{SceneId, ScenePhase, SizeClass};
use defender_core::events::VisualEvent;
use defender_core::state::FrameSnapshot;
use defender_core::types::{Position, Velocity};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{SimConfig, Simulation};
use crate::registry::Registry;
use crate::timers::{TimerAction, TimerQueue};

/// Drive an engine from the menu into a running session.
/// Returns the timestamp of the first Playing tick.
fn start_playing(engine: &mut Simulation) -> f64 {
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(0.0);
    assert_eq!(
        engine.phase(),
        ScenePhase::TransitioningOut {
            target: SceneId::Game
        }
    );
    engine.tick(250.0);
    engine.tick(600.0);
    assert_eq!(engine.phase(), ScenePhase::Playing);
    600.0
}

fn input(move_left: bool, move_right: bool, fire: bool) -> PlayerCommand {
    PlayerCommand::SetInput {
        input: InputState {
            move_left,
            move_right,
            fire,
        },
    }
}

fn obstacle_ids(snapshot: &FrameSnapshot) -> Vec<u64> {
    snapshot.obstacles.iter().map(|o| o.id).collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = Simulation::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = Simulation::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for i in 0..300u64 {
        let now = i as f64 * 16.0;
        if i == 100 {
            engine_a.queue_command(input(true, false, true));
            engine_b.queue_command(input(true, false, true));
        }
        let snap_a = engine_a.tick(now);
        let snap_b = engine_b.tick(now);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = Simulation::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = Simulation::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // Snapshots match until the first randomized obstacle spawn, then
    // diverge (different x positions / fall speeds).
    let mut diverged = false;
    for i in 0..300u64 {
        let now = i as f64 * 16.0;
        let snap_a = engine_a.tick(now);
        let snap_b = engine_b.tick(now);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Spawn cadence ----

#[test]
fn test_spawn_cadence_window() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    // Union of all obstacle ids ever seen = number of spawns (ids are
    // generation-tagged, so despawned slots never repeat an id).
    let mut seen: HashSet<u64> = HashSet::new();
    let mut t = start;
    while t < start + 5000.0 {
        t += 16.0;
        let snap = engine.tick(t);
        seen.extend(obstacle_ids(&snap));
    }

    // Window of 5000ms at a 1000ms interval: floor = 5, tolerance ±1.
    assert!(
        (4..=5).contains(&seen.len()),
        "Expected 4..=5 spawns in a 5s window, got {}",
        seen.len()
    );
}

#[test]
fn test_no_spawn_burst_after_stall() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    let snap = engine.tick(start + 16.0);
    assert!(snap.obstacles.is_empty(), "No spawn before one full interval");

    // Host stalls for 8 seconds: exactly one catch-up spawn, not eight.
    let snap = engine.tick(start + 8000.0);
    assert_eq!(snap.obstacles.len(), 1, "A stall must spawn exactly once");

    let snap = engine.tick(start + 8016.0);
    assert_eq!(snap.obstacles.len(), 1, "No further spawn right after");
}

#[test]
fn test_first_spawn_after_full_interval() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    let snap = engine.tick(start + 984.0);
    assert!(snap.obstacles.is_empty());

    let snap = engine.tick(start + 1024.0);
    assert_eq!(snap.obstacles.len(), 1);
}

// ---- Lifecycle ----

#[test]
fn test_off_field_sweep() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    // Past the lower bound by more than the margin: gone within one tick.
    engine.spawn_obstacle_at(300.0, FIELD_HEIGHT + OFFSCREEN_MARGIN + 1.0);
    let snap = engine.tick(start + 16.0);
    assert!(snap.obstacles.is_empty(), "Off-field obstacle must be swept");
}

#[test]
fn test_soft_kill_idempotent() {
    let mut registry = Registry::new();
    let entity = registry.spawn_obstacle_with(
        Position::new(100.0, 100.0),
        Velocity::new(0.0, 120.0),
        SizeClass::Large,
        10.0,
    );

    assert!(registry.soft_kill(entity), "First soft-kill transitions");
    assert!(!registry.soft_kill(entity), "Second soft-kill is a no-op");
    assert!(!registry.is_active(entity));
}

#[test]
fn test_destroy_idempotent() {
    let mut registry = Registry::new();
    let entity = registry.spawn_projectile(Position::new(10.0, 10.0));

    registry.destroy(entity);
    registry.destroy(entity); // second call must be a silent no-op
    assert!(!registry.is_active(entity));
    assert!(!registry.soft_kill(entity));
}

#[test]
fn test_kind_of_lookup() {
    use defender_core::enums::EntityKind;

    let mut registry = Registry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let player = registry.spawn_player();
    let obstacle = registry.spawn_obstacle(&mut rng);
    let projectile = registry.spawn_projectile(Position::new(10.0, 10.0));
    let effect = registry.spawn_effect(Position::new(20.0, 20.0), 0.0);

    assert_eq!(registry.kind_of(player), Some(EntityKind::Player));
    assert_eq!(registry.kind_of(obstacle), Some(EntityKind::Obstacle));
    assert_eq!(registry.kind_of(projectile), Some(EntityKind::Projectile));
    assert_eq!(registry.kind_of(effect), Some(EntityKind::Effect));

    registry.destroy(projectile);
    assert_eq!(registry.kind_of(projectile), None);
}

#[test]
fn test_spawn_parameters_within_ranges() {
    let mut registry = Registry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let entity = registry.spawn_obstacle(&mut rng);
        let pos = *registry.world().get::<&Position>(entity).unwrap();
        let vel = *registry.world().get::<&Velocity>(entity).unwrap();
        let class = registry
            .world()
            .get::<&defender_core::components::ObstacleClass>(entity)
            .unwrap()
            .size;
        let spin = registry
            .world()
            .get::<&defender_core::components::Spin>(entity)
            .unwrap()
            .angular_velocity;

        assert!(pos.x >= SPAWN_MARGIN && pos.x <= FIELD_WIDTH - SPAWN_MARGIN);
        assert_eq!(pos.y, SPAWN_START_Y);
        let (lo, hi) = match class {
            SizeClass::Small => SMALL_FALL_SPEED,
            SizeClass::Large => LARGE_FALL_SPEED,
        };
        assert!(vel.y >= lo && vel.y <= hi);
        assert!(spin.abs() <= OBSTACLE_MAX_SPIN);
    }
}

// ---- Combat scenarios ----

#[test]
fn test_scenario_normal_kill() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.spawn_obstacle_at(500.0, 300.0);
    engine.spawn_projectile_at(500.0, 310.0);

    let snap = engine.tick(start + 16.0);

    // Both soft-killed this tick: projectile removed immediately, obstacle
    // lingers inactive for its grace delay.
    assert!(snap.projectiles.is_empty(), "Projectile removed immediately");
    assert_eq!(snap.obstacles.len(), 1);
    assert!(!snap.obstacles[0].active, "Obstacle soft-killed");
    assert_eq!(snap.session.score, SCORE_PER_KILL);

    // One effect at the obstacle position.
    assert_eq!(snap.effects.len(), 1);
    assert_eq!(snap.effects[0].position, Position::new(500.0, 300.0));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, VisualEvent::Explosion { x, y } if *x == 500.0 && *y == 300.0)));

    // Before the grace delay elapses the obstacle is still present.
    let snap = engine.tick(start + 200.0);
    assert_eq!(snap.obstacles.len(), 1);

    // After the grace delay it is permanently removed.
    let snap = engine.tick(start + 16.0 + KILL_GRACE_DELAY_MS + 16.0);
    assert!(snap.obstacles.is_empty(), "Obstacle removed after grace");

    // The effect self-terminates after its fixed duration.
    let snap = engine.tick(start + 16.0 + EFFECT_DURATION_MS + 16.0);
    assert!(snap.effects.is_empty(), "Effect expired");
    assert_eq!(snap.session.score, SCORE_PER_KILL, "Score unchanged after");
}

#[test]
fn test_obstacle_consumed_by_first_overlap_only() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.spawn_obstacle_at(500.0, 300.0);
    engine.spawn_projectile_at(500.0, 310.0);
    engine.spawn_projectile_at(500.0, 292.0);

    let snap = engine.tick(start + 16.0);

    // Only the first qualifying overlap scores; the second projectile
    // finds the obstacle already inactive and survives.
    assert_eq!(snap.session.score, SCORE_PER_KILL);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.effects.len(), 1);
}

#[test]
fn test_scenario_player_hit() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.spawn_obstacle_at(PLAYER_START_X, PLAYER_START_Y);
    let snap = engine.tick(start + 16.0);

    let player = snap.player.as_ref().unwrap();
    assert!(player.hit, "Player enters the hit state");
    assert_eq!(snap.session.score, 0, "No score from a player hit");
    assert_eq!(snap.session.integrity, PLAYER_START_INTEGRITY);
    assert_eq!(snap.obstacles.len(), 1);
    assert!(!snap.obstacles[0].active, "Obstacle soft-killed");
    assert_eq!(snap.effects.len(), 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, VisualEvent::PlayerHit { .. })));

    // Hit state persists through its window...
    let snap = engine.tick(start + 150.0);
    assert!(snap.player.as_ref().unwrap().hit);

    // ...and clears automatically once the window has elapsed.
    let snap = engine.tick(start + 16.0 + PLAYER_HIT_DURATION_MS + 16.0);
    assert!(!snap.player.as_ref().unwrap().hit);
    assert_eq!(snap.session.score, 0);

    // Obstacle removed after the same grace delay as a projectile kill.
    let snap = engine.tick(start + 16.0 + KILL_GRACE_DELAY_MS + 32.0);
    assert!(snap.obstacles.is_empty());
}

#[test]
fn test_rehit_extends_window_and_stale_timer_noops() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.spawn_obstacle_at(PLAYER_START_X, PLAYER_START_Y);
    let snap = engine.tick(start + 16.0); // hit until start+216
    assert!(snap.player.as_ref().unwrap().hit);

    engine.spawn_obstacle_at(PLAYER_START_X, PLAYER_START_Y);
    let snap = engine.tick(start + 100.0); // re-hit, window now start+300
    assert!(snap.player.as_ref().unwrap().hit);

    // First clear timer fires around start+216 but the window was pushed
    // forward, so it must no-op.
    let snap = engine.tick(start + 230.0);
    assert!(snap.player.as_ref().unwrap().hit, "Stale clear must no-op");

    let snap = engine.tick(start + 320.0);
    assert!(!snap.player.as_ref().unwrap().hit);
}

#[test]
fn test_damage_on_hit_config() {
    let mut engine = Simulation::new(SimConfig {
        damage_on_hit: true,
        ..Default::default()
    });
    let start = start_playing(&mut engine);

    engine.spawn_obstacle_at(PLAYER_START_X, PLAYER_START_Y);
    let snap = engine.tick(start + 16.0);
    assert_eq!(snap.session.integrity, PLAYER_START_INTEGRITY - 1);
    assert_eq!(snap.session.score, 0);
}

#[test]
fn test_score_monotonic() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    let mut previous = 0u32;
    for i in 1..600u64 {
        // Spam fire with release gaps so shots actually leave the ship.
        engine.queue_command(input(i % 7 < 3, i % 11 < 4, i % 2 == 0));
        let snap = engine.tick(start + i as f64 * 16.0);
        assert!(
            snap.session.score >= previous,
            "Score must never decrease (tick {i})"
        );
        previous = snap.session.score;
    }
}

// ---- Player controller ----

#[test]
fn test_fire_on_rising_edge_only() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.queue_command(input(false, false, true));
    let snap = engine.tick(start + 16.0);
    assert_eq!(snap.projectiles.len(), 1, "Rising edge fires once");
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, VisualEvent::ShotFired)));

    let snap = engine.tick(start + 32.0);
    assert_eq!(snap.projectiles.len(), 1, "Held fire does not re-fire");

    engine.queue_command(input(false, false, false));
    engine.tick(start + 48.0);
    engine.queue_command(input(false, false, true));
    let snap = engine.tick(start + 64.0);
    assert_eq!(snap.projectiles.len(), 2, "Release and re-press fires again");
}

#[test]
fn test_left_takes_precedence() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.queue_command(input(true, true, false));
    let snap = engine.tick(start + 16.0);
    let player = snap.player.unwrap();
    assert_eq!(player.velocity.x, -PLAYER_SPEED);
    assert!(player.position.x < PLAYER_START_X);
}

#[test]
fn test_player_clamped_to_field() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    engine.queue_command(input(true, false, false));
    let mut snap = None;
    for i in 1..200u64 {
        snap = Some(engine.tick(start + i as f64 * 16.0));
    }
    let player = snap.unwrap().player.unwrap();
    assert_eq!(player.position.x, PLAYER_HALF_WIDTH, "Clamped at left edge");
}

// ---- Scene transitions ----

#[test]
fn test_menu_to_play_reset() {
    let mut engine = Simulation::new(SimConfig::default());

    let snap = engine.tick(0.0);
    assert_eq!(snap.phase, ScenePhase::Menu);
    assert!(snap.player.is_none());

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(16.0);
    assert_eq!(
        snap.phase,
        ScenePhase::TransitioningOut {
            target: SceneId::Game
        }
    );
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, VisualEvent::FadeOut { duration_ms, target }
            if *duration_ms == SCENE_TRANSITION_MS && *target == SceneId::Game)));

    // Gameplay is frozen during the transition: fire intent is ignored.
    engine.queue_command(input(false, false, true));
    let snap = engine.tick(300.0);
    assert_eq!(
        snap.phase,
        ScenePhase::TransitioningOut {
            target: SceneId::Game
        }
    );
    assert!(snap.player.is_none());
    assert!(snap.projectiles.is_empty());

    // After the fixed duration: Playing, fresh session.
    let snap = engine.tick(540.0);
    assert_eq!(snap.phase, ScenePhase::Playing);
    assert_eq!(snap.session.score, 0);
    assert!(snap.player.is_some(), "Exactly one player entity");
    assert!(snap.obstacles.is_empty(), "Zero obstacles on entry");
    assert!(
        snap.projectiles.is_empty(),
        "Held fire across the transition is not a rising edge"
    );
    let player = snap.player.unwrap();
    assert_eq!(player.position.x, PLAYER_START_X);
    assert_eq!(player.position.y, PLAYER_START_Y);

    // Next spawn no earlier than one full interval after entry.
    let snap = engine.tick(540.0 + 984.0);
    assert!(snap.obstacles.is_empty());
    let snap = engine.tick(540.0 + 1040.0);
    assert_eq!(snap.obstacles.len(), 1);
}

#[test]
fn test_quit_transition_freezes_and_clears() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    // Run until the first obstacle has spawned and is falling.
    let mut t = start;
    let mut snap = engine.tick(t);
    while snap.obstacles.is_empty() {
        t += 16.0;
        snap = engine.tick(t);
    }
    let frozen = snap.obstacles[0].clone();

    engine.queue_command(PlayerCommand::QuitToMenu);
    let snap = engine.tick(t + 16.0);
    assert_eq!(
        snap.phase,
        ScenePhase::TransitioningOut {
            target: SceneId::Menu
        }
    );

    // Physics paused: nothing moves, nothing spawns, input is ignored.
    engine.queue_command(input(true, false, true));
    let snap = engine.tick(t + 400.0);
    assert_eq!(snap.obstacles.len(), 1);
    assert_eq!(snap.obstacles[0].position, frozen.position);
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.player.as_ref().unwrap().position.x, PLAYER_START_X);

    // Transition completes back to the menu with a cleared registry.
    let snap = engine.tick(t + 16.0 + SCENE_TRANSITION_MS + 16.0);
    assert_eq!(snap.phase, ScenePhase::Menu);
    assert!(snap.player.is_none());
    assert!(snap.obstacles.is_empty());
    assert!(snap.effects.is_empty());
}

#[test]
fn test_transition_guards() {
    let mut engine = Simulation::new(SimConfig::default());

    // Quit is not honored in the menu.
    engine.queue_command(PlayerCommand::QuitToMenu);
    let snap = engine.tick(16.0);
    assert_eq!(snap.phase, ScenePhase::Menu);

    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(32.0);
    let snap = engine.tick(600.0);
    assert_eq!(snap.phase, ScenePhase::Playing);

    // Start is not honored while playing.
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(616.0);
    assert_eq!(snap.phase, ScenePhase::Playing);

    // Neither start nor quit is honored mid-transition.
    engine.queue_command(PlayerCommand::QuitToMenu);
    engine.tick(632.0);
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_command(PlayerCommand::QuitToMenu);
    let snap = engine.tick(648.0);
    assert_eq!(
        snap.phase,
        ScenePhase::TransitioningOut {
            target: SceneId::Menu
        }
    );
}

#[test]
fn test_session_elapsed_time() {
    let mut engine = Simulation::new(SimConfig::default());
    let start = start_playing(&mut engine);

    let snap = engine.tick(start + 2500.0);
    assert_eq!(snap.session.elapsed_ms, 2500.0);
}

// ---- Timer queue ----

#[test]
fn test_timer_queue_drains_due_entries_in_order() {
    let mut timers = TimerQueue::default();
    let mut registry = Registry::new();
    let a = registry.spawn_projectile(Position::new(0.0, 0.0));
    let b = registry.spawn_projectile(Position::new(1.0, 1.0));

    timers.schedule(100.0, TimerAction::DestroyEntity(a));
    timers.schedule(300.0, TimerAction::DestroyEntity(b));
    timers.schedule(200.0, TimerAction::ClearPlayerHit);

    let mut due = Vec::new();
    timers.drain_due(250.0, &mut due);
    assert_eq!(due.len(), 2);
    assert!(matches!(due[0], TimerAction::DestroyEntity(e) if e == a));
    assert!(matches!(due[1], TimerAction::ClearPlayerHit));
    assert_eq!(timers.len(), 1);

    due.clear();
    timers.drain_due(1000.0, &mut due);
    assert_eq!(due.len(), 1);
    assert!(timers.is_empty());
}
