//! The player's orb: position, elemental state, ability stack, health,
//! score, and temporary effects.
//!
//! The orb mutates itself and reports outcomes; it never touches the
//! event bus directly. Systems translate outcomes into events.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use chroma_core::constants::*;
use chroma_core::enums::{BuffKind, Element, EssenceColor};
use chroma_core::types::Rect;
use chroma_elements::state::{ElementalState, SpecialEffect, SpecialOutcome};

use crate::abilities::{fold_layers, AbilityLayer, AbilitySet};

/// Directional input flags, independently settable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Unit direction of the summed active inputs, or zero when idle.
    pub fn direction(&self) -> DVec2 {
        let mut dir = DVec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if dir != DVec2::ZERO {
            dir = dir.normalize();
        }
        dir
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincibility window or timed damage shield swallowed the hit.
    Blocked,
    /// Damage (after mitigation) was applied.
    Taken { dealt: i32, died: bool },
}

/// The player actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub input: MoveInput,

    state: ElementalState,
    previous_element: Option<Element>,

    layers: Vec<AbilityLayer>,
    abilities: AbilitySet,

    health: i32,
    max_health: i32,
    score: i64,
    essences_collected: u32,

    // Temporary effects — independent timers
    temp_speed_factor: f64,
    temp_speed_secs: f64,
    phasing: bool,
    phasing_secs: f64,
    shielded: bool,
    shield_secs: f64,
    dashing: bool,
    dash_direction: DVec2,
    dash_remaining: f64,
    invincible: bool,
    invincibility_secs: f64,

    pulse_phase: f64,
    trail_phase: f64,
}

impl Orb {
    pub fn new(spawn: DVec2) -> Self {
        Self {
            position: spawn,
            velocity: DVec2::ZERO,
            radius: ORB_RADIUS,
            input: MoveInput::default(),
            state: ElementalState::new(Element::Fire),
            previous_element: None,
            layers: Vec::new(),
            abilities: AbilitySet::base(),
            health: ORB_MAX_HEALTH,
            max_health: ORB_MAX_HEALTH,
            score: 0,
            essences_collected: 0,
            temp_speed_factor: 1.0,
            temp_speed_secs: 0.0,
            phasing: false,
            phasing_secs: 0.0,
            shielded: false,
            shield_secs: 0.0,
            dashing: false,
            dash_direction: DVec2::X,
            dash_remaining: 0.0,
            invincible: false,
            invincibility_secs: 0.0,
            pulse_phase: 0.0,
            trail_phase: 0.0,
        }
    }

    /// Advance the orb by one tick: cooldown, temporary effects, layer
    /// expiry, then movement integration (dash overrides input-driven
    /// movement while in progress). Returns the kinds of layers that
    /// expired this tick, in expiry order.
    pub fn update(&mut self, dt: f64) -> Vec<BuffKind> {
        self.state.update(dt);
        self.update_temporary_effects(dt);
        let expired = self.update_layers(dt);
        self.update_movement(dt);

        self.pulse_phase += dt * ORB_PULSE_RATE;
        self.trail_phase += dt * ORB_TRAIL_RATE;

        if self.invincible {
            self.invincibility_secs -= dt;
            if self.invincibility_secs <= 0.0 {
                self.invincible = false;
                log::debug!("invincibility ended");
            }
        }

        expired
    }

    fn update_temporary_effects(&mut self, dt: f64) {
        if self.temp_speed_secs > 0.0 {
            self.temp_speed_secs -= dt;
            if self.temp_speed_secs <= 0.0 {
                self.temp_speed_factor = 1.0;
            }
        }

        if self.phasing {
            self.phasing_secs -= dt;
            if self.phasing_secs <= 0.0 {
                self.phasing = false;
            }
        }

        if self.shielded {
            self.shield_secs -= dt;
            if self.shield_secs <= 0.0 {
                self.shielded = false;
            }
        }

        if self.dashing {
            let step = DASH_SPEED * dt;
            if self.dash_remaining > 0.0 {
                self.position += self.dash_direction * step;
                self.dash_remaining -= step;
            } else {
                self.dashing = false;
            }
        }
    }

    fn update_layers(&mut self, dt: f64) -> Vec<BuffKind> {
        let mut expired = Vec::new();
        self.layers.retain_mut(|layer| {
            let alive = layer.tick(dt);
            if !alive {
                expired.push(layer.kind);
            }
            alive
        });
        if !expired.is_empty() {
            // Rebuild from the base with the survivors, oldest first.
            self.abilities = fold_layers(&self.layers);
        }
        expired
    }

    fn update_movement(&mut self, dt: f64) {
        if self.dashing {
            return;
        }
        let direction = self.input.direction();
        self.velocity = direction * self.effective_speed();
        self.position += self.velocity * dt;
    }

    /// Effective movement speed: base speed from the ability stack,
    /// scaled by the elemental state and any temporary burst.
    pub fn effective_speed(&self) -> f64 {
        self.abilities.speed * self.state.speed_modifier() * self.temp_speed_factor
    }

    // ---- Elemental state ----

    /// Switch element. Returns the replaced element, or `None` for a
    /// no-op switch to the already-active element.
    pub fn transmute(&mut self, to: Element) -> Option<Element> {
        let previous = self.state.transmute(to)?;
        self.previous_element = Some(previous);
        Some(previous)
    }

    /// Trigger the active element's special action; on activation the
    /// effect is applied to the orb immediately.
    pub fn use_special(&mut self) -> SpecialOutcome {
        let outcome = self.state.use_special();
        if let SpecialOutcome::Activated(effect) = outcome {
            self.apply_special_effect(effect);
        }
        outcome
    }

    fn apply_special_effect(&mut self, effect: SpecialEffect) {
        match effect {
            SpecialEffect::SpeedBurst {
                factor,
                duration_secs,
            } => {
                self.temp_speed_factor = factor;
                self.temp_speed_secs = duration_secs;
            }
            SpecialEffect::PhaseThrough { duration_secs } => {
                self.phasing = true;
                self.phasing_secs = duration_secs;
            }
            SpecialEffect::DamageShield { duration_secs } => {
                self.shielded = true;
                self.shield_secs = duration_secs;
            }
            SpecialEffect::Dash { distance } => {
                // Dash along the current movement direction, +X if idle.
                let dir = if self.velocity != DVec2::ZERO {
                    self.velocity.normalize()
                } else {
                    DVec2::X
                };
                self.dashing = true;
                self.dash_direction = dir;
                self.dash_remaining = distance;
            }
        }
    }

    pub fn can_absorb(&self, color: EssenceColor) -> bool {
        self.state.can_absorb(color)
    }

    // ---- Ability stack ----

    /// Push a new layer on top of the stack and recompute the effective
    /// set.
    pub fn push_layer(&mut self, layer: AbilityLayer) {
        self.layers.push(layer);
        self.abilities = fold_layers(&self.layers);
    }

    pub fn layers(&self) -> &[AbilityLayer] {
        &self.layers
    }

    pub fn abilities(&self) -> &AbilitySet {
        &self.abilities
    }

    pub fn absorption_range(&self) -> f64 {
        self.abilities.absorption_range
    }

    pub fn magnet_strength(&self) -> f64 {
        self.abilities.magnet_strength
    }

    pub fn multi_absorb(&self) -> bool {
        self.abilities.multi_absorb
    }

    // ---- Damage and health ----

    /// Apply incoming damage. Invincibility and the timed damage shield
    /// block the hit entirely; otherwise the ability stack's mitigation
    /// percentage scales it down. Health floors at zero and a fresh
    /// invincibility window starts.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.invincible || self.shielded {
            log::debug!("damage blocked (invincible or shielded)");
            return DamageOutcome::Blocked;
        }

        let mitigation = self.abilities.mitigation_pct / 100.0;
        let dealt = (amount as f64 * (1.0 - mitigation)) as i32;
        self.health = (self.health - dealt).max(0);

        self.invincible = true;
        self.invincibility_secs = INVINCIBILITY_SECS;

        DamageOutcome::Taken {
            dealt,
            died: self.health == 0,
        }
    }

    /// Restore health, clamped to the maximum. Returns the amount
    /// actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    // ---- Score ----

    /// Award points, scaled by the stack's score multiplier and floored
    /// to an integer. Returns the amount actually added.
    pub fn add_score(&mut self, points: i64) -> i64 {
        let actual = (points as f64 * self.abilities.score_multiplier) as i64;
        self.score += actual;
        actual
    }

    pub fn record_absorption(&mut self) {
        self.essences_collected += 1;
    }

    // ---- Bounds ----

    /// Clamp the orb so its circle stays inside the arena. Called by the
    /// simulation step, not by `update`.
    pub fn constrain_to(&mut self, bounds: Rect) {
        self.position = bounds.clamp_circle(self.position, self.radius);
    }

    // ---- Accessors ----

    pub fn element(&self) -> Element {
        self.state.element()
    }

    pub fn previous_element(&self) -> Option<Element> {
        self.previous_element
    }

    pub fn special_cooldown_secs(&self) -> f64 {
        self.state.cooldown_secs()
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn essences_collected(&self) -> u32 {
        self.essences_collected
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_phasing(&self) -> bool {
        self.phasing
    }

    pub fn is_shielded(&self) -> bool {
        self.shielded
    }

    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn pulse_phase(&self) -> f64 {
        self.pulse_phase
    }

    pub fn trail_phase(&self) -> f64 {
        self.trail_phase
    }

    pub fn visual_radius(&self) -> f64 {
        self.radius + self.pulse_phase.sin() * 3.0
    }
}
