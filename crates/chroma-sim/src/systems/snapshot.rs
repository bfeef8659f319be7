//! Snapshot system: builds the complete per-tick view of the game.
//!
//! Read-only over the simulation state; the tick's drained events ride
//! along in the snapshot.

use chroma_core::enums::GamePhase;
use chroma_core::events::GameEvent;
use chroma_core::state::*;
use chroma_core::types::SimTime;
use chroma_elements::profiles::profile;

use crate::chamber::ChamberTree;
use crate::level::Level;
use crate::objective::Objective;
use crate::orb::Orb;

pub fn build_snapshot(
    level: Option<&Level>,
    orb: &Orb,
    time: SimTime,
    phase: GamePhase,
    events: Vec<GameEvent>,
) -> GameSnapshot {
    let (level_number, level_name) = level
        .map(|l| (l.number, l.name.clone()))
        .unwrap_or((0, String::new()));

    GameSnapshot {
        time,
        phase,
        level_number,
        level_name,
        orb: build_orb(orb),
        chambers: level.map(|l| build_chambers(&l.tree)).unwrap_or_default(),
        objectives: level
            .map(|l| l.objectives.iter().map(build_objective).collect())
            .unwrap_or_default(),
        completion_percent: level.map(|l| l.completion_percent()).unwrap_or(0.0),
        events,
    }
}

fn build_orb(orb: &Orb) -> OrbView {
    let element_profile = profile(orb.element());
    OrbView {
        position: orb.position,
        velocity: orb.velocity,
        radius: orb.radius,
        visual_radius: orb.visual_radius(),
        element: orb.element(),
        previous_element: orb.previous_element(),
        state_color: element_profile.state_color.to_string(),
        glow_color: element_profile.glow_color.to_string(),
        layers: orb
            .layers()
            .iter()
            .map(|layer| LayerView {
                kind: layer.kind,
                name: layer.kind.layer_name().to_string(),
                remaining_secs: layer.remaining_secs,
            })
            .collect(),
        health: orb.health(),
        max_health: orb.max_health(),
        score: orb.score(),
        essences_collected: orb.essences_collected(),
        special_cooldown_secs: orb.special_cooldown_secs(),
        phasing: orb.is_phasing(),
        shielded: orb.is_shielded(),
        dashing: orb.is_dashing(),
        invincible: orb.is_invincible(),
        pulse_phase: orb.pulse_phase(),
        trail_phase: orb.trail_phase(),
    }
}

fn build_chambers(tree: &ChamberTree) -> Vec<ChamberView> {
    tree.pre_order()
        .into_iter()
        .map(|id| {
            let chamber = tree.chamber(id);
            ChamberView {
                id: chamber.id.0,
                parent: chamber.parent.map(|p| p.0),
                name: chamber.name.clone(),
                bounds: chamber.bounds,
                background: chamber.background.clone(),
                border: chamber.border.clone(),
                is_compound: chamber.is_compound(),
                essences: chamber
                    .essences
                    .iter()
                    .map(|e| EssenceView {
                        id: e.id,
                        color: e.color,
                        position: e.position,
                        radius: e.radius,
                        visual_radius: e.visual_radius(),
                        float_y: e.float_y(),
                        collected: e.collected,
                        point_value: e.point_value,
                    })
                    .collect(),
                hazards: chamber
                    .hazards
                    .iter()
                    .map(|h| HazardView {
                        id: h.id,
                        kind: h.kind,
                        position: h.position,
                        extent: h.extent,
                        visual_extent: h.visual_extent(),
                        rotation_deg: h.rotation_deg,
                        damage: h.damage(),
                    })
                    .collect(),
                buffs: chamber
                    .buffs
                    .iter()
                    .map(|b| BuffView {
                        id: b.id,
                        kind: b.kind,
                        position: b.position,
                        radius: b.radius,
                        visual_radius: b.visual_radius(),
                        float_y: b.float_y(),
                        spin_deg: b.spin_deg,
                        collected: b.collected,
                        duration_secs: b.duration_secs,
                    })
                    .collect(),
                total_essences: tree.total_essences(id),
                remaining_essences: tree.remaining_essences(id),
                completion_percent: tree.completion_percent(id),
            }
        })
        .collect()
}

fn build_objective(objective: &Objective) -> ObjectiveView {
    ObjectiveView {
        name: objective.name.clone(),
        description: objective.description.clone(),
        requirements: objective.requirements().clone(),
        target_total: objective.target_total(),
        bonus_points: objective.bonus_points,
        satisfied: objective.satisfied,
    }
}
