//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in field space (pixels).
/// x grows rightward, y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in field space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
///
/// The host drives ticks at a variable but monotonically non-decreasing
/// timestamp; `dt_secs` is the delta to the previous tick, already clamped
/// for integration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Host timestamp of this tick in milliseconds.
    pub now_ms: f64,
    /// Integration delta for this tick in seconds.
    pub dt_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another position in pixels.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (px/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl SimTime {
    /// Advance to the next host timestamp, clamping the integration delta.
    pub fn advance(&mut self, now_ms: f64) {
        let raw_dt = ((now_ms - self.now_ms) / 1000.0).max(0.0);
        self.dt_secs = raw_dt.min(crate::constants::MAX_DT_SECS);
        self.now_ms = now_ms;
        self.tick += 1;
    }
}
