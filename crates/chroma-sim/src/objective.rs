//! Level objectives: collection targets granting bonus score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use chroma_core::enums::EssenceColor;

/// A collection objective. Carries a per-color requirement map for
/// display, but completion is gated on the aggregate total of the map
/// against the orb's overall collected count — the per-color breakdown
/// is informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    pub description: String,
    requirements: BTreeMap<EssenceColor, u32>,
    pub bonus_points: i64,
    pub satisfied: bool,
}

impl Objective {
    pub fn new(name: &str, description: &str, bonus_points: i64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            requirements: BTreeMap::new(),
            bonus_points,
            satisfied: false,
        }
    }

    /// Add a per-color requirement (builder style). Repeated colors
    /// overwrite.
    pub fn require(mut self, color: EssenceColor, count: u32) -> Self {
        self.requirements.insert(color, count);
        self
    }

    pub fn requirements(&self) -> &BTreeMap<EssenceColor, u32> {
        &self.requirements
    }

    /// The number that gates completion: the sum of all requirement
    /// counts.
    pub fn target_total(&self) -> u32 {
        self.requirements.values().sum()
    }

    /// Whether the orb's aggregate collected count meets the target.
    pub fn is_met_by(&self, essences_collected: u32) -> bool {
        essences_collected >= self.target_total()
    }
}
