//! Simulation engine — owns all game state and drives the per-tick
//! pipeline.
//!
//! `SimulationEngine` processes queued commands at the tick boundary,
//! runs the systems in their fixed order while a session is active, and
//! produces a `GameSnapshot` each tick. Completely headless; all
//! external feedback flows through the event bus and the snapshot.

use std::collections::VecDeque;

use glam::DVec2;

use chroma_core::commands::OrbCommand;
use chroma_core::enums::GamePhase;
use chroma_core::events::{EventKind, GameEvent};
use chroma_core::state::GameSnapshot;
use chroma_core::types::SimTime;
use chroma_elements::state::SpecialOutcome;

use crate::bus::EventBus;
use crate::level::Level;
use crate::orb::Orb;
use crate::systems;

/// The simulation engine. Owns the level, the orb, and the event bus.
pub struct SimulationEngine {
    level: Option<Level>,
    orb: Orb,
    bus: EventBus,
    time: SimTime,
    phase: GamePhase,
    command_queue: VecDeque<OrbCommand>,
    /// Events accumulated during the current tick, in emission order.
    events: Vec<GameEvent>,
    completion_announced: bool,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self {
            level: None,
            orb: Orb::new(DVec2::ZERO),
            bus: EventBus::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            completion_announced: false,
        }
    }

    /// Install a pre-built level. The orb moves to the level's spawn
    /// point; session stats (health, score, layers) carry over, so a
    /// mid-session level change behaves like walking through a door.
    pub fn load_level(&mut self, level: Level) {
        self.orb.position = level.spawn;
        self.orb.velocity = DVec2::ZERO;
        self.completion_announced = false;

        self.events.push(
            GameEvent::new(EventKind::LevelStarted, self.time)
                .with("levelNumber", level.number)
                .with("levelName", level.name.as_str()),
        );
        log::info!("level {} loaded: {}", level.number, level.name);
        self.level = Some(level);
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: OrbCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OrbCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. Systems only run while the session is `Playing`; death
    /// halts further runs until the session is restarted.
    pub fn tick(&mut self) -> GameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.bus.publish(event);
        }

        systems::snapshot::build_snapshot(
            self.level.as_ref(),
            &self.orb,
            self.time,
            self.phase,
            events,
        )
    }

    /// Declare the whole run won (called by the session layer once the
    /// final level completes).
    pub fn complete_session(&mut self) {
        self.phase = GamePhase::Victory;
        self.events.push(
            GameEvent::new(EventKind::Victory, self.time).with("score", self.orb.score()),
        );
        log::info!("session won with score {}", self.orb.score());
    }

    // ---- Accessors ----

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn orb(&self) -> &Orb {
        &self.orb
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Mutable bus access for subscriptions.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    // ---- Command processing ----

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: OrbCommand) {
        match command {
            OrbCommand::SetMoveUp { pressed } => self.orb.input.up = pressed,
            OrbCommand::SetMoveDown { pressed } => self.orb.input.down = pressed,
            OrbCommand::SetMoveLeft { pressed } => self.orb.input.left = pressed,
            OrbCommand::SetMoveRight { pressed } => self.orb.input.right = pressed,

            OrbCommand::Transmute { element } => {
                if self.phase != GamePhase::Playing {
                    return;
                }
                if let Some(previous) = self.orb.transmute(element) {
                    self.events.push(
                        GameEvent::new(EventKind::OrbTransmuted, self.time)
                            .with("oldElement", previous.name())
                            .with("newElement", element.name()),
                    );
                }
            }

            OrbCommand::UseSpecial => {
                if self.phase != GamePhase::Playing {
                    return;
                }
                match self.orb.use_special() {
                    SpecialOutcome::Activated(effect) => {
                        log::debug!("special activated: {effect:?}");
                    }
                    SpecialOutcome::OnCooldown { remaining_secs } => {
                        log::debug!("special on cooldown ({remaining_secs:.1}s remaining)");
                    }
                }
            }

            OrbCommand::StartSession => {
                if !matches!(
                    self.phase,
                    GamePhase::Menu | GamePhase::GameOver | GamePhase::Victory
                ) {
                    return;
                }
                let Some(level) = self.level.as_ref() else {
                    log::warn!("StartSession ignored: no level loaded");
                    return;
                };
                self.orb = Orb::new(level.spawn);
                self.time = SimTime::default();
                self.completion_announced = false;
                self.phase = GamePhase::Playing;
                self.events
                    .push(GameEvent::new(EventKind::SessionStarted, self.time));
            }

            OrbCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                    self.events
                        .push(GameEvent::new(EventKind::SessionPaused, self.time));
                }
            }

            OrbCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                    self.events
                        .push(GameEvent::new(EventKind::SessionResumed, self.time));
                }
            }
        }
    }

    // ---- Systems ----

    /// Run all systems in order. The order is a contract: movement,
    /// tree animation, absorption, hazards, buffs, objectives,
    /// completion, death check.
    fn run_systems(&mut self) {
        let time = self.time;
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let arena = level.tree.chamber(level.tree.root()).bounds;

        // 1. Advance the orb, clamp to the arena.
        systems::movement::run(&mut self.orb, arena, time, &mut self.events);
        // 2. Advance all chamber content animation.
        level.tree.update(time.dt());
        // 3a/b. Magnet pull + essence absorption.
        systems::absorption::run(&mut level.tree, &mut self.orb, time, &mut self.events);
        // 3c. Hazard contact damage.
        systems::hazards::run(&level.tree, &mut self.orb, time, &mut self.events);
        // 3d. Buff pickups.
        systems::buffs::run(&mut level.tree, &mut self.orb, time, &mut self.events);
        // 4. Objective checks.
        systems::objectives::run(&mut level.objectives, &mut self.orb, time, &mut self.events);
        // 5. Completion check.
        systems::completion::run(
            level,
            &self.orb,
            &mut self.completion_announced,
            time,
            &mut self.events,
        );
        // 6. Death check: announce once and halt further ticks.
        if !self.orb.is_alive() {
            self.phase = GamePhase::GameOver;
            self.events.push(
                GameEvent::new(EventKind::OrbDied, time).with("finalScore", self.orb.score()),
            );
            self.events.push(
                GameEvent::new(EventKind::GameOver, time)
                    .with("score", self.orb.score())
                    .with("time", time.elapsed_secs),
            );
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}
