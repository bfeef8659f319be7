//! Events emitted by the simulation for UI and logging feedback.
//!
//! Every event carries a kind, an open key/value payload, and the
//! simulation time at which it fired. Events are immutable once built
//! and are delivered through the event bus as well as in each tick's
//! snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::SimTime;

/// Event kinds published by the simulation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    // Session lifecycle
    SessionStarted,
    SessionPaused,
    SessionResumed,
    GameOver,
    Victory,

    // Level lifecycle
    LevelStarted,
    LevelCompleted,
    ChamberCleared,

    // Orb
    OrbTransmuted,
    OrbDamaged,
    OrbHealed,
    OrbDied,
    ScoreChanged,

    // Collisions and pickups
    EssenceAbsorbed,
    HazardHit,
    BuffCollected,
    LayerApplied,
    LayerExpired,

    // Objectives
    ObjectiveCompleted,
}

/// A single game event with an arbitrary key/value payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub data: BTreeMap<String, Value>,
    /// Tick at which the event fired.
    pub tick: u64,
    /// Simulation seconds at which the event fired.
    pub elapsed_secs: f64,
}

impl GameEvent {
    pub fn new(kind: EventKind, time: SimTime) -> Self {
        Self {
            kind,
            data: BTreeMap::new(),
            tick: time.tick,
            elapsed_secs: time.elapsed_secs,
        }
    }

    /// Attach a payload entry (builder style).
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}
