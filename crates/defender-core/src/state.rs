//! Frame snapshot — the complete visible state sent to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{ScenePhase, SizeClass};
use crate::events::VisualEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete frame state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: ScenePhase,
    pub session: SessionView,
    pub player: Option<PlayerView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub effects: Vec<EffectView>,
    pub events: Vec<VisualEvent>,
}

/// Running session stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    /// Monotonically non-decreasing score.
    pub score: u32,
    /// Elapsed play time (ms) within the current session.
    pub elapsed_ms: f64,
    /// Remaining integrity counter.
    pub integrity: u32,
}

/// Player ship for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: u64,
    pub position: Position,
    pub velocity: Velocity,
    /// Hit (visual invulnerability) flag.
    pub hit: bool,
}

/// A falling obstacle for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u64,
    pub position: Position,
    pub size: SizeClass,
    /// Rotation angle in degrees.
    pub angle: f64,
    /// False once soft-killed (cosmetic aftermath only).
    pub active: bool,
}

/// A projectile for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Position,
}

/// A transient effect for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub id: u64,
    pub position: Position,
}
