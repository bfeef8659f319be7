//! Session layer: owns the engine, feeds it the campaign levels, and
//! decides what happens when a level completes.
//!
//! The engine only announces completion; this layer loads the next
//! level or declares victory after the last one. A global event
//! subscriber forwards everything to the logging sink.

use std::collections::VecDeque;

use chroma_core::commands::OrbCommand;
use chroma_core::events::EventKind;
use chroma_core::state::GameSnapshot;
use chroma_sim::engine::SimulationEngine;
use chroma_sim::level::Level;

/// Parameters for a fresh session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub width: f64,
    pub height: f64,
    pub difficulty: u32,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            difficulty: 1,
            seed: 42,
        }
    }
}

pub struct Session {
    engine: SimulationEngine,
    pending: VecDeque<Level>,
}

impl Session {
    /// Build a session over the generated campaign.
    pub fn new(config: SessionConfig) -> Self {
        let levels = chroma_levelgen::campaign(
            config.width,
            config.height,
            config.difficulty,
            config.seed,
        );
        Self::with_levels(levels)
    }

    /// Build a session over an explicit level list (first level loads
    /// immediately).
    pub fn with_levels(levels: Vec<Level>) -> Self {
        let mut pending: VecDeque<Level> = levels.into();
        let mut engine = SimulationEngine::new();

        engine.bus_mut().subscribe_all_fn(|event| {
            log::info!(
                "[{}] {:?} {}",
                event.tick,
                event.kind,
                serde_json::to_string(&event.data).unwrap_or_default()
            );
            Ok(())
        });

        if let Some(first) = pending.pop_front() {
            engine.load_level(first);
        }
        Self { engine, pending }
    }

    pub fn queue_command(&mut self, command: OrbCommand) {
        self.engine.queue_command(command);
    }

    /// Run one fixed tick and handle level advancement.
    pub fn step(&mut self) -> GameSnapshot {
        let snapshot = self.engine.tick();

        if snapshot
            .events
            .iter()
            .any(|e| e.kind == EventKind::LevelCompleted)
        {
            match self.pending.pop_front() {
                Some(next) => self.engine.load_level(next),
                None => self.engine.complete_session(),
            }
        }

        snapshot
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn levels_remaining(&self) -> usize {
        self.pending.len()
    }
}
