//! Game state snapshot — the complete visible state produced each tick.
//!
//! Snapshots are the read-only query surface for rendering and HUD
//! layers: orb status, the chamber tree flattened in pre-order, objective
//! progress, and the events that fired during the tick.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Rect, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level_number: u32,
    pub level_name: String,
    pub orb: OrbView,
    /// Chambers in pre-order (each parent before its subtree).
    pub chambers: Vec<ChamberView>,
    pub objectives: Vec<ObjectiveView>,
    /// Whole-level completion percentage (0.0 - 100.0).
    pub completion_percent: f64,
    /// Events that fired during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

/// Orb status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrbView {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    /// Radius with the pulse animation applied.
    pub visual_radius: f64,
    pub element: Element,
    pub previous_element: Option<Element>,
    /// Display color of the active element.
    pub state_color: String,
    /// Glow color of the active element.
    pub glow_color: String,
    /// Active ability layers, oldest first.
    pub layers: Vec<LayerView>,
    pub health: i32,
    pub max_health: i32,
    pub score: i64,
    pub essences_collected: u32,
    /// Remaining cooldown on the active element's special ability.
    pub special_cooldown_secs: f64,
    pub phasing: bool,
    pub shielded: bool,
    pub dashing: bool,
    pub invincible: bool,
    pub pulse_phase: f64,
    pub trail_phase: f64,
}

/// One active ability layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerView {
    pub kind: BuffKind,
    pub name: String,
    /// Remaining seconds; negative means permanent.
    pub remaining_secs: f64,
}

/// One chamber and its direct content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChamberView {
    pub id: u32,
    pub parent: Option<u32>,
    pub name: String,
    pub bounds: Rect,
    pub background: String,
    pub border: String,
    pub is_compound: bool,
    pub essences: Vec<EssenceView>,
    pub hazards: Vec<HazardView>,
    pub buffs: Vec<BuffView>,
    /// Recursive totals over this chamber's subtree.
    pub total_essences: u32,
    pub remaining_essences: u32,
    pub completion_percent: f64,
}

/// An essence particle for drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssenceView {
    pub id: u32,
    pub color: EssenceColor,
    pub position: DVec2,
    pub radius: f64,
    pub visual_radius: f64,
    /// Y with the float animation applied.
    pub float_y: f64,
    pub collected: bool,
    pub point_value: i64,
}

/// A hazard for drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardView {
    pub id: u32,
    pub kind: HazardKind,
    pub position: DVec2,
    pub extent: DVec2,
    /// Extent with the pulse animation applied (equals `extent` for
    /// non-pulsing kinds).
    pub visual_extent: DVec2,
    pub rotation_deg: f64,
    pub damage: i32,
}

/// A buff pickup for drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffView {
    pub id: u32,
    pub kind: BuffKind,
    pub position: DVec2,
    pub radius: f64,
    pub visual_radius: f64,
    pub float_y: f64,
    pub spin_deg: f64,
    pub collected: bool,
    pub duration_secs: f64,
}

/// Objective progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub name: String,
    pub description: String,
    pub requirements: BTreeMap<EssenceColor, u32>,
    /// Sum of the requirement counts — the number that actually gates
    /// completion.
    pub target_total: u32,
    pub bonus_points: i64,
    pub satisfied: bool,
}
