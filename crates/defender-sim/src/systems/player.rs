//! Player controller — translates input intents into velocity and
//! projectile-creation requests.

use defender_core::commands::InputState;
use defender_core::components::Player;
use defender_core::constants::PLAYER_SPEED;
use defender_core::events::VisualEvent;
use defender_core::types::{Position, Velocity};

use crate::registry::Registry;

/// Apply movement intents and handle firing for this tick.
///
/// Velocity is reset to zero first, then the horizontal axis is driven by
/// the mutually exclusive left/right intents — left wins when both are
/// held. Vertical velocity stays zero. `fire_edge` is the rising edge of
/// the fire intent computed by the engine; firing has no cooldown beyond
/// edge detection.
pub fn run(
    registry: &mut Registry,
    input: &InputState,
    fire_edge: bool,
    events: &mut Vec<VisualEvent>,
) {
    let mut fire_from = None;

    for (_entity, (pos, vel, _player)) in registry
        .world_mut()
        .query_mut::<(&Position, &mut Velocity, &Player)>()
    {
        *vel = Velocity::default();
        if input.move_left {
            vel.x = -PLAYER_SPEED;
        } else if input.move_right {
            vel.x = PLAYER_SPEED;
        }

        if fire_edge {
            fire_from = Some(*pos);
        }
    }

    if let Some(position) = fire_from {
        registry.spawn_projectile(position);
        events.push(VisualEvent::ShotFired);
    }
}
