//! Spawn scheduler — admits one obstacle per elapsed interval.

use rand_chacha::ChaCha8Rng;

use defender_core::constants::SPAWN_INTERVAL_MS;

use crate::registry::Registry;

/// Threshold-based spawn cadence state.
#[derive(Debug, Clone)]
pub struct SpawnSchedule {
    /// Host timestamp of the last spawn (ms).
    pub last_spawn_at_ms: f64,
    /// Fixed interval between spawns (ms).
    pub interval_ms: f64,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            last_spawn_at_ms: 0.0,
            interval_ms: SPAWN_INTERVAL_MS,
        }
    }
}

impl SpawnSchedule {
    /// Reset the cadence so the first spawn happens one full interval from
    /// `now_ms`. Called on session start.
    pub fn reset(&mut self, now_ms: f64) {
        self.last_spawn_at_ms = now_ms;
    }
}

/// Spawn exactly one obstacle if the interval has elapsed.
///
/// `last_spawn_at_ms` is set to the current time rather than accumulated,
/// so a long host stall produces a single spawn, never a catch-up burst.
pub fn run(registry: &mut Registry, rng: &mut ChaCha8Rng, schedule: &mut SpawnSchedule, now_ms: f64) {
    if now_ms - schedule.last_spawn_at_ms > schedule.interval_ms {
        registry.spawn_obstacle(rng);
        schedule.last_spawn_at_ms = now_ms;
    }
}
