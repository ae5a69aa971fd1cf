//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over the registry/world. They do not own
//! state — all state lives in components or in the engine.

pub mod collision;
pub mod combat;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod sweep;
