//! Buff pickup collection.
//!
//! Pickups trigger on contact with the orb's physical circle (not the
//! absorption range). Collecting one pushes the matching ability layer
//! with the pickup's grant duration.

use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::SimTime;

use crate::abilities::AbilityLayer;
use crate::chamber::ChamberTree;
use crate::orb::Orb;

pub fn run(tree: &mut ChamberTree, orb: &mut Orb, time: SimTime, events: &mut Vec<GameEvent>) {
    let orb_pos = orb.position;
    let orb_radius = orb.radius;

    for chamber_id in tree.pre_order() {
        let chamber = tree.chamber_mut(chamber_id);
        for buff in &mut chamber.buffs {
            if buff.collected || !buff.in_range(orb_pos, orb_radius) {
                continue;
            }

            buff.collected = true;
            orb.push_layer(AbilityLayer::timed(buff.kind, buff.duration_secs));

            log::debug!(
                "collected {} ({}s)",
                buff.kind.display_name(),
                buff.duration_secs
            );
            events.push(
                GameEvent::new(EventKind::BuffCollected, time)
                    .with("buff", buff.kind.display_name())
                    .with("duration", buff.duration_secs),
            );
            events.push(
                GameEvent::new(EventKind::LayerApplied, time)
                    .with("layer", buff.kind.layer_name())
                    .with("duration", buff.duration_secs),
            );
        }
    }
}
