//! Simulation engine for Planet Defender.
//!
//! Owns the hecs ECS world, runs systems once per host-driven tick,
//! and produces FrameSnapshots for the presentation layer.

pub mod engine;
pub mod registry;
pub mod systems;
pub mod timers;

pub use defender_core as core;
pub use engine::Simulation;

#[cfg(test)]
mod tests;
