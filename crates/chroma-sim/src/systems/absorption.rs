//! Magnet pull and essence absorption.
//!
//! Essences are scanned in pre-order of the chamber tree. Each
//! uncollected essence inside the magnet radius is pulled toward the
//! orb first; it is then marked for absorption when it sits inside the
//! absorption range and its color matches the active element. Without
//! multi-absorb the scan stops at the first match, so later essences
//! see neither the pull nor an absorption check that tick. All marked
//! absorptions are applied after the scan.

use chroma_core::constants::MAGNET_PULL_RADIUS;
use chroma_core::enums::EssenceColor;
use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::SimTime;

use crate::chamber::{ChamberId, ChamberTree};
use crate::orb::Orb;

struct Absorption {
    chamber: ChamberId,
    essence_id: u32,
    color: EssenceColor,
    point_value: i64,
}

pub fn run(tree: &mut ChamberTree, orb: &mut Orb, time: SimTime, events: &mut Vec<GameEvent>) {
    let dt = time.dt();
    let orb_pos = orb.position;
    let magnet = orb.magnet_strength();
    let range = orb.absorption_range();
    let multi = orb.multi_absorb();

    let mut marked: Vec<Absorption> = Vec::new();

    'scan: for chamber_id in tree.pre_order() {
        let chamber = tree.chamber_mut(chamber_id);
        for essence in &mut chamber.essences {
            if essence.collected {
                continue;
            }

            if magnet > 0.0 && essence.position.distance(orb_pos) < MAGNET_PULL_RADIUS {
                essence.pull_toward(orb_pos, magnet, dt);
            }

            if essence.in_range(orb_pos, range) && orb.can_absorb(essence.color) {
                marked.push(Absorption {
                    chamber: chamber_id,
                    essence_id: essence.id,
                    color: essence.color,
                    point_value: essence.point_value,
                });
                if !multi {
                    break 'scan;
                }
            }
        }
    }

    for absorption in marked {
        let chamber = tree.chamber_mut(absorption.chamber);
        if let Some(essence) = chamber
            .essences
            .iter_mut()
            .find(|e| e.id == absorption.essence_id)
        {
            essence.collected = true;
        }

        orb.record_absorption();
        let old_score = orb.score();
        let awarded = orb.add_score(absorption.point_value);

        log::debug!(
            "absorbed {} essence for {awarded} points",
            absorption.color.name()
        );
        events.push(
            GameEvent::new(EventKind::EssenceAbsorbed, time)
                .with("color", absorption.color.name())
                .with("essenceId", absorption.essence_id)
                .with("points", absorption.point_value),
        );
        events.push(
            GameEvent::new(EventKind::ScoreChanged, time)
                .with("oldScore", old_score)
                .with("newScore", orb.score())
                .with("points", awarded)
                .with(
                    "reason",
                    format!("Essence absorbed: {}", absorption.color.name()),
                ),
        );
    }
}
