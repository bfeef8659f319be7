//! Level completion detection.
//!
//! When the chamber tree reports 100% completion the system emits
//! ChamberCleared and LevelCompleted, once per level. The enclosing
//! session decides whether to load another level or end the run — the
//! core only announces.

use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::SimTime;

use crate::level::Level;
use crate::orb::Orb;

pub fn run(
    level: &Level,
    orb: &Orb,
    announced: &mut bool,
    time: SimTime,
    events: &mut Vec<GameEvent>,
) {
    if *announced || !level.is_complete() {
        return;
    }
    *announced = true;

    let root = level.tree.chamber(level.tree.root());
    log::info!("level {} cleared: {}", level.number, level.name);
    events.push(
        GameEvent::new(EventKind::ChamberCleared, time)
            .with("chamber", root.name.as_str())
            .with("chamberId", root.id.0),
    );
    events.push(
        GameEvent::new(EventKind::LevelCompleted, time)
            .with("levelNumber", level.number)
            .with("levelName", level.name.as_str())
            .with("score", orb.score()),
    );
}
