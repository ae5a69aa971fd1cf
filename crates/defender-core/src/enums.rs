//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity kind tag. Assigned at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Projectile,
    Effect,
    Player,
}

/// Obstacle size class, determining extent and fall-speed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Large,
}

/// Top-level scene identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneId {
    #[default]
    Menu,
    Game,
}

/// Scene phase (top-level state machine).
///
/// Transitions are one-directional and guarded: Menu and Playing are only
/// reachable through `TransitioningOut`, during which no gameplay mutation
/// occurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum ScenePhase {
    #[default]
    Menu,
    TransitioningOut {
        target: SceneId,
    },
    Playing,
}
