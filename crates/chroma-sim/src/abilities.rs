//! The orb's composable ability stack.
//!
//! An immutable base set of scalar capabilities plus an ordered list of
//! named, timed layers. The effective set is a left fold of the layers
//! (oldest first) over the base; each layer either passes a field
//! through or combines it with its own contribution. The per-field
//! combinators are commutative, so rebuilding the chain after an expiry
//! yields the same scalars as if the expired layer had never been
//! applied.

use serde::{Deserialize, Serialize};

use chroma_core::constants::*;
use chroma_core::enums::BuffKind;

/// The orb's effective scalar capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilitySet {
    /// Movement speed (units per second).
    pub speed: f64,
    /// Essence absorption range (units).
    pub absorption_range: f64,
    /// Damage mitigation (percent, 0-90).
    pub mitigation_pct: f64,
    /// Score multiplier applied to every award.
    pub score_multiplier: f64,
    /// Magnet pull strength (units per second; 0 = inactive).
    pub magnet_strength: f64,
    /// Whether several essences may be absorbed in one tick.
    pub multi_absorb: bool,
}

impl AbilitySet {
    /// The undecorated base capabilities.
    pub fn base() -> Self {
        Self {
            speed: BASE_SPEED,
            absorption_range: BASE_ABSORPTION_RANGE,
            mitigation_pct: BASE_MITIGATION_PCT,
            score_multiplier: BASE_SCORE_MULTIPLIER,
            magnet_strength: BASE_MAGNET_STRENGTH,
            multi_absorb: false,
        }
    }
}

impl Default for AbilitySet {
    fn default() -> Self {
        Self::base()
    }
}

/// One named layer in the stack, with its own remaining duration.
/// A negative duration means the layer is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityLayer {
    pub kind: BuffKind,
    pub remaining_secs: f64,
}

impl AbilityLayer {
    pub fn timed(kind: BuffKind, duration_secs: f64) -> Self {
        Self {
            kind,
            remaining_secs: duration_secs,
        }
    }

    pub fn permanent(kind: BuffKind) -> Self {
        Self {
            kind,
            remaining_secs: -1.0,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.remaining_secs < 0.0
    }

    /// Advance the clock. Returns `true` while the layer is still
    /// active; permanent layers never expire.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.is_permanent() {
            return true;
        }
        self.remaining_secs -= dt;
        self.remaining_secs > 0.0
    }

    /// Combine this layer's contribution into the running set.
    pub fn apply(&self, set: &mut AbilitySet) {
        match self.kind {
            BuffKind::SpeedBoost => {
                set.speed *= SPEED_BOOST_FACTOR;
            }
            BuffKind::Shield => {
                set.mitigation_pct =
                    (set.mitigation_pct + SHIELD_MITIGATION_ADD).min(MITIGATION_CAP_PCT);
            }
            BuffKind::Magnet => {
                set.magnet_strength += MAGNET_STRENGTH_ADD;
                set.absorption_range *= MAGNET_RANGE_FACTOR;
            }
            BuffKind::MultiAbsorb => {
                set.multi_absorb = true;
            }
            BuffKind::ScoreMultiplier => {
                set.score_multiplier *= SCORE_MULTIPLIER_FACTOR;
            }
            BuffKind::RangeBoost => {
                set.absorption_range *= RANGE_BOOST_FACTOR;
            }
        }
    }
}

/// Fold the surviving layers, oldest first, over the immutable base.
pub fn fold_layers(layers: &[AbilityLayer]) -> AbilitySet {
    let mut set = AbilitySet::base();
    for layer in layers {
        layer.apply(&mut set);
    }
    set
}
