//! Orb advancement and arena clamping.

use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::{Rect, SimTime};

use crate::orb::Orb;

/// Advance the orb one tick, then clamp it to the arena bounds. Layers
/// that expired during the tick are reported as events.
pub fn run(orb: &mut Orb, arena: Rect, time: SimTime, events: &mut Vec<GameEvent>) {
    let expired = orb.update(time.dt());
    orb.constrain_to(arena);

    for kind in expired {
        log::debug!("ability layer expired: {}", kind.layer_name());
        events.push(
            GameEvent::new(EventKind::LayerExpired, time).with("layer", kind.layer_name()),
        );
    }
}
