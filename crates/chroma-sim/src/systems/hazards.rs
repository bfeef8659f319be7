//! Hazard contact damage.
//!
//! Every hazard overlapping the orb's circle registers a hit this tick
//! (several can land at once); damage application itself is subject to
//! the orb's invincibility and shield rules. A phasing orb skips the
//! pass entirely.

use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::SimTime;

use crate::chamber::ChamberTree;
use crate::orb::{DamageOutcome, Orb};

pub fn run(tree: &ChamberTree, orb: &mut Orb, time: SimTime, events: &mut Vec<GameEvent>) {
    if orb.is_phasing() {
        return;
    }

    for chamber_id in tree.pre_order() {
        for hazard in &tree.chamber(chamber_id).hazards {
            if !hazard.collides_with_circle(orb.position, orb.radius) {
                continue;
            }

            let old_health = orb.health();
            let outcome = orb.take_damage(hazard.damage());

            let mut hit = GameEvent::new(EventKind::HazardHit, time)
                .with("hazard", hazard.kind.display_name())
                .with("damage", hazard.damage());

            match outcome {
                DamageOutcome::Blocked => {
                    hit = hit.with("blocked", true);
                    events.push(hit);
                }
                DamageOutcome::Taken { dealt, .. } => {
                    events.push(hit.with("blocked", false));
                    log::debug!(
                        "hit by {} for {dealt} ({} -> {})",
                        hazard.kind.display_name(),
                        old_health,
                        orb.health()
                    );
                    events.push(
                        GameEvent::new(EventKind::OrbDamaged, time)
                            .with("damage", dealt)
                            .with("oldHealth", old_health)
                            .with("newHealth", orb.health()),
                    );
                }
            }
        }
    }
}
