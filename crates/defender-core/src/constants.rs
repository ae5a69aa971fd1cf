//! Simulation constants and tuning parameters.
//!
//! Time values are in milliseconds (host time units), speeds in px/s.

// --- Field ---

/// Play field width in pixels.
pub const FIELD_WIDTH: f64 = 1024.0;

/// Play field height in pixels.
pub const FIELD_HEIGHT: f64 = 768.0;

/// Margin below the field past which falling obstacles are swept.
pub const OFFSCREEN_MARGIN: f64 = 100.0;

/// Maximum integration delta per tick (seconds). A long host stall
/// produces one clamped step instead of teleporting entities.
pub const MAX_DT_SECS: f64 = 0.25;

// --- Spawning ---

/// Interval between obstacle spawns (ms).
pub const SPAWN_INTERVAL_MS: f64 = 1000.0;

/// Horizontal margin kept clear at both field edges when spawning.
pub const SPAWN_MARGIN: f64 = 50.0;

/// Vertical spawn position, above the visible field.
pub const SPAWN_START_Y: f64 = -50.0;

/// Small obstacle fall speed range (px/s).
pub const SMALL_FALL_SPEED: (f64, f64) = (150.0, 350.0);

/// Large obstacle fall speed range (px/s).
pub const LARGE_FALL_SPEED: (f64, f64) = (80.0, 200.0);

/// Angular velocity range for obstacles (deg/s, symmetric).
pub const OBSTACLE_MAX_SPIN: f64 = 50.0;

// --- Bounding extents (half sizes, px) ---

/// Small obstacle half extent.
pub const SMALL_HALF_EXTENT: f64 = 20.0;

/// Large obstacle half extent.
pub const LARGE_HALF_EXTENT: f64 = 45.0;

/// Player ship half width / half height.
pub const PLAYER_HALF_WIDTH: f64 = 32.0;
pub const PLAYER_HALF_HEIGHT: f64 = 24.0;

/// Projectile half width / half height.
pub const PROJECTILE_HALF_WIDTH: f64 = 4.0;
pub const PROJECTILE_HALF_HEIGHT: f64 = 12.0;

// --- Player ---

/// Horizontal speed cap (px/s).
pub const PLAYER_SPEED: f64 = 300.0;

/// Player start position when a session begins.
pub const PLAYER_START_X: f64 = 512.0;
pub const PLAYER_START_Y: f64 = 668.0;

/// Duration of the transient hit (visual invulnerability) state (ms).
pub const PLAYER_HIT_DURATION_MS: f64 = 200.0;

/// Starting integrity counter.
pub const PLAYER_START_INTEGRITY: u32 = 3;

// --- Projectiles ---

/// Upward projectile speed (px/s).
pub const PROJECTILE_SPEED: f64 = 600.0;

// --- Combat ---

/// Score awarded per projectile-vs-obstacle kill.
pub const SCORE_PER_KILL: u32 = 10;

/// Delay between an obstacle's soft-kill and its permanent removal (ms),
/// covering the cosmetic aftermath.
pub const KILL_GRACE_DELAY_MS: f64 = 300.0;

/// Lifetime of a spawned explosion effect (ms).
pub const EFFECT_DURATION_MS: f64 = 400.0;

// --- Scenes ---

/// Duration of the fade-out transition between scenes (ms).
pub const SCENE_TRANSITION_MS: f64 = 500.0;
