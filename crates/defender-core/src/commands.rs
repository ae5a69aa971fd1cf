//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Input intents sampled once per tick by the input collaborator.
///
/// `fire` is the raw held state; the engine derives the rising edge by
/// comparing against the previous tick's sample.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the sampled input intents for subsequent ticks.
    SetInput { input: InputState },
    /// Start a play session. Honored only in the Menu scene.
    StartGame,
    /// Return to the menu. Honored only while Playing.
    QuitToMenu,
}
