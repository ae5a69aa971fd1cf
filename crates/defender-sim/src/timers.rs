//! Deferred-action timer queue.
//!
//! Fire-once entries executed at tick boundaries, never interleaved with
//! in-progress resolution and never preempting a tick. Entries are never
//! cancelled; an action whose subject is already gone must no-op.

use hecs::Entity;

use defender_core::enums::SceneId;

/// What to do when a timer fires.
#[derive(Debug, Clone, Copy)]
pub enum TimerAction {
    /// Permanently remove an entity (grace-delay destruction).
    DestroyEntity(Entity),
    /// Clear the player's transient hit state, unless a later hit has
    /// pushed the window forward.
    ClearPlayerHit,
    /// Finish the current scene transition and enter the target scene.
    CompleteTransition(SceneId),
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due_at_ms: f64,
    action: TimerAction,
}

/// Fire-once timer queue. Best-effort ordering: due entries fire in
/// scheduling order, with no precision guarantee beyond the configured delay.
#[derive(Default)]
pub struct TimerQueue {
    entries: Vec<Timer>,
}

impl TimerQueue {
    pub fn schedule(&mut self, due_at_ms: f64, action: TimerAction) {
        self.entries.push(Timer { due_at_ms, action });
    }

    /// Move every due action into `out`, preserving scheduling order.
    pub fn drain_due(&mut self, now_ms: f64, out: &mut Vec<TimerAction>) {
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_at_ms <= now_ms {
                out.push(self.entries.remove(i).action);
            } else {
                i += 1;
            }
        }
    }

    /// Drop all pending entries. Used on scene entry, where the registry is
    /// cleared anyway: every pending subject is gone, and dropping the
    /// entries is equivalent to letting them all no-op (entity ids may be
    /// reused by the fresh world).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
