//! Events emitted by the simulation for the presentation layer.
//!
//! The core never renders or plays anything itself; it requests playback
//! through these cues and the host picks them up from the frame snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::SceneId;

/// Visual/audio cues for the host each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualEvent {
    /// Begin a fade-out toward the named scene.
    FadeOut { duration_ms: f64, target: SceneId },
    /// Play an explosion at the given field position.
    Explosion { x: f64, y: f64 },
    /// The player entered the hit state.
    PlayerHit { duration_ms: f64 },
    /// A projectile was fired.
    ShotFired,
}
