//! Fixed timestep helpers
//!
//! Per-frame work on the object registry that needs no audio or scheduling:
//! ballistic integration and the offscreen sweep.

use super::state::{GameEvent, GameState, SpawnedObject};

/// Advance every live object by `dt` seconds of scaled simulation time
pub fn integrate(state: &mut GameState, gravity: f32, dt: f32) {
    let dt = dt * state.physics_speed;
    if dt <= 0.0 {
        return;
    }
    for object in state.objects.iter_mut().filter(|o| o.alive) {
        object.integrate(gravity, dt);
    }
}

/// Remove every object below `threshold`.
///
/// Walks the registry from the back so in-place removal never skips an
/// entry. Returns the removed objects in the order they were swept.
pub fn sweep_offscreen(state: &mut GameState, threshold: f32) -> Vec<SpawnedObject> {
    let mut expired = Vec::new();
    for index in (0..state.objects.len()).rev() {
        if state.objects[index].pos.y >= threshold {
            continue;
        }
        let object = state.objects.remove(index);
        state.events.push(GameEvent::Expired {
            id: object.id,
            kind: object.kind,
        });
        expired.push(object);
    }
    expired
}
