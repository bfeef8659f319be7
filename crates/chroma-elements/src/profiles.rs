//! Element-specific behavior profiles.
//!
//! Consolidates per-element parameters: absorption compatibility, speed
//! modifier, special action, cooldown, and display palette.

use chroma_core::constants::*;
use chroma_core::enums::{Element, EssenceColor};

use crate::state::SpecialEffect;

/// Behavioral profile for an elemental state.
pub struct ElementProfile {
    /// The two essence colors this element can absorb.
    pub compatible: [EssenceColor; 2],
    /// Movement speed multiplier while this element is active.
    pub speed_modifier: f64,
    /// Special action cooldown (seconds).
    pub cooldown_secs: f64,
    /// Display color of the orb in this state.
    pub state_color: &'static str,
    /// Glow color of the orb in this state.
    pub glow_color: &'static str,
    /// Short name of the special action.
    pub special_name: &'static str,
    /// One-line description for the HUD.
    pub special_description: &'static str,
}

impl ElementProfile {
    /// Whether this element can absorb an essence of the given color.
    pub fn can_absorb(&self, color: EssenceColor) -> bool {
        self.compatible.contains(&color)
    }

    /// The effect the special action applies when triggered.
    pub fn special_effect(&self, element: Element) -> SpecialEffect {
        match element {
            Element::Fire => SpecialEffect::SpeedBurst {
                factor: FIRE_BURST_FACTOR,
                duration_secs: FIRE_BURST_SECS,
            },
            Element::Water => SpecialEffect::PhaseThrough {
                duration_secs: WATER_PHASE_SECS,
            },
            Element::Earth => SpecialEffect::DamageShield {
                duration_secs: EARTH_SHIELD_SECS,
            },
            Element::Air => SpecialEffect::Dash {
                distance: AIR_DASH_DISTANCE,
            },
        }
    }
}

/// Get the behavior profile for a given element.
pub fn profile(element: Element) -> &'static ElementProfile {
    match element {
        Element::Fire => &FIRE,
        Element::Water => &WATER,
        Element::Earth => &EARTH,
        Element::Air => &AIR,
    }
}

static FIRE: ElementProfile = ElementProfile {
    compatible: [EssenceColor::Red, EssenceColor::Orange],
    speed_modifier: 1.2,
    cooldown_secs: FIRE_COOLDOWN_SECS,
    state_color: "#FF4500",
    glow_color: "#FF6347",
    special_name: "BURST",
    special_description: "BURST: Double speed for 2 seconds (5s cooldown)",
};

static WATER: ElementProfile = ElementProfile {
    compatible: [EssenceColor::Blue, EssenceColor::Cyan],
    speed_modifier: 1.0,
    cooldown_secs: WATER_COOLDOWN_SECS,
    state_color: "#1E90FF",
    glow_color: "#00CED1",
    special_name: "FLOW",
    special_description: "FLOW: Phase through hazards for 3 seconds (8s cooldown)",
};

static EARTH: ElementProfile = ElementProfile {
    compatible: [EssenceColor::Green, EssenceColor::Brown],
    speed_modifier: 0.8,
    cooldown_secs: EARTH_COOLDOWN_SECS,
    state_color: "#228B22",
    glow_color: "#8B4513",
    special_name: "BULWARK",
    special_description: "BULWARK: Damage immunity for 4 seconds (10s cooldown)",
};

static AIR: ElementProfile = ElementProfile {
    compatible: [EssenceColor::White, EssenceColor::Yellow],
    speed_modifier: 1.4,
    cooldown_secs: AIR_COOLDOWN_SECS,
    state_color: "#F0F8FF",
    glow_color: "#FFD700",
    special_name: "DASH",
    special_description: "DASH: Quick dash in movement direction (3s cooldown)",
};
