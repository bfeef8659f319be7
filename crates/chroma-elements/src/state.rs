//! Transmutation bookkeeping and the cooldown gate for special actions.

use serde::{Deserialize, Serialize};

use chroma_core::enums::{Element, EssenceColor};

use crate::profiles::profile;

/// Effect applied to the orb when a special action fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpecialEffect {
    /// Temporary movement speed multiplier.
    SpeedBurst { factor: f64, duration_secs: f64 },
    /// Pass through hazards without taking damage.
    PhaseThrough { duration_secs: f64 },
    /// Block all incoming damage.
    DamageShield { duration_secs: f64 },
    /// Instantaneous burst of distance in the movement direction.
    Dash { distance: f64 },
}

/// Result of attempting the special action. Being on cooldown is a
/// normal outcome for the caller to surface, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecialOutcome {
    Activated(SpecialEffect),
    OnCooldown { remaining_secs: f64 },
}

/// The orb's active elemental state plus its special-action cooldown.
///
/// Exactly one element is active at a time. Entering a state resets its
/// cooldown to zero; transmuting to the already-active element is a
/// no-op.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementalState {
    element: Element,
    cooldown_secs: f64,
}

impl ElementalState {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            cooldown_secs: 0.0,
        }
    }

    pub fn element(&self) -> Element {
        self.element
    }

    /// Remaining special-action cooldown, never negative.
    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_secs.max(0.0)
    }

    /// Whether an essence of the given color is absorbable right now.
    pub fn can_absorb(&self, color: EssenceColor) -> bool {
        profile(self.element).can_absorb(color)
    }

    /// Movement speed multiplier of the active element.
    pub fn speed_modifier(&self) -> f64 {
        profile(self.element).speed_modifier
    }

    /// Advance the cooldown clock. Called once per tick.
    pub fn update(&mut self, dt: f64) {
        if self.cooldown_secs > 0.0 {
            self.cooldown_secs -= dt;
        }
    }

    /// Switch to another element. Returns the replaced element, or `None`
    /// when `to` is already active (in which case nothing changes — no
    /// exit/enter hooks run and the cooldown is untouched).
    pub fn transmute(&mut self, to: Element) -> Option<Element> {
        if self.element == to {
            return None;
        }
        let previous = self.element;
        log::debug!("transmuting {} -> {}", previous.name(), to.name());
        self.element = to;
        self.cooldown_secs = 0.0;
        Some(previous)
    }

    /// Attempt the special action. On success the cooldown restarts at
    /// the element's fixed value and the effect is returned for the
    /// caller to apply.
    pub fn use_special(&mut self) -> SpecialOutcome {
        let profile = profile(self.element);
        if self.cooldown_secs > 0.0 {
            return SpecialOutcome::OnCooldown {
                remaining_secs: self.cooldown_secs,
            };
        }
        self.cooldown_secs = profile.cooldown_secs;
        SpecialOutcome::Activated(profile.special_effect(self.element))
    }
}

impl Default for ElementalState {
    fn default() -> Self {
        Self::new(Element::Fire)
    }
}
