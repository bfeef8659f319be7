//! Objective completion checks.
//!
//! An objective is satisfied as soon as the orb's aggregate collected
//! count reaches the sum of its requirement counts; the per-color map
//! does not gate completion. Satisfying an objective awards its bonus
//! (scaled by the score multiplier like any other award).

use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::SimTime;

use crate::objective::Objective;
use crate::orb::Orb;

pub fn run(objectives: &mut [Objective], orb: &mut Orb, time: SimTime, events: &mut Vec<GameEvent>) {
    for objective in objectives.iter_mut() {
        if objective.satisfied || !objective.is_met_by(orb.essences_collected()) {
            continue;
        }

        objective.satisfied = true;
        let old_score = orb.score();
        let awarded = orb.add_score(objective.bonus_points);

        log::info!("objective complete: {} (+{awarded})", objective.name);
        events.push(
            GameEvent::new(EventKind::ObjectiveCompleted, time)
                .with("objective", objective.name.as_str())
                .with("bonusPoints", objective.bonus_points),
        );
        events.push(
            GameEvent::new(EventKind::ScoreChanged, time)
                .with("oldScore", old_score)
                .with("newScore", orb.score())
                .with("points", awarded)
                .with("reason", format!("Objective completed: {}", objective.name)),
        );
    }
}
