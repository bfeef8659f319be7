//! Game-object records held by chambers: essences, hazards, and buff
//! pickups.
//!
//! These are plain data with a per-tick visual-phase update. Shapes are
//! fixed at build time; only animation state (and essence position,
//! under magnet pull) mutates afterward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use chroma_core::constants::*;
use chroma_core::enums::{BuffKind, EssenceColor, HazardKind};
use chroma_core::types::Rect;

/// A collectible essence particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Essence {
    /// Tree-assigned identity.
    pub id: u32,
    pub color: EssenceColor,
    pub position: DVec2,
    pub radius: f64,
    pub point_value: i64,
    pub collected: bool,
    pub pulse_phase: f64,
    pub float_phase: f64,
}

impl Essence {
    pub fn new(color: EssenceColor, position: DVec2, point_value: i64) -> Self {
        Self {
            id: 0,
            color,
            position,
            radius: ESSENCE_RADIUS,
            point_value,
            collected: false,
            pulse_phase: 0.0,
            float_phase: 0.0,
        }
    }

    /// Scatter the animation phases so particles don't pulse in lockstep.
    pub fn with_phases(mut self, pulse: f64, float: f64) -> Self {
        self.pulse_phase = pulse;
        self.float_phase = float;
        self
    }

    /// Advance the animation.
    pub fn update(&mut self, dt: f64) {
        self.pulse_phase += dt * ESSENCE_PULSE_RATE;
        self.float_phase += dt * ESSENCE_FLOAT_RATE;
    }

    /// Radius with the pulse effect applied.
    pub fn visual_radius(&self) -> f64 {
        self.radius + self.pulse_phase.sin() * 3.0
    }

    /// Y with the float animation applied.
    pub fn float_y(&self) -> f64 {
        self.position.y + self.float_phase.sin() * 5.0
    }

    /// Whether a point is within collection range of this essence.
    pub fn in_range(&self, p: DVec2, range: f64) -> bool {
        self.position.distance(p) <= range + self.radius
    }

    /// Pull the essence toward a point at `strength` units per second.
    pub fn pull_toward(&mut self, target: DVec2, strength: f64, dt: f64) {
        let delta = target - self.position;
        let dist = delta.length();
        if dist > 0.0 {
            self.position += delta / dist * strength * dt;
        }
    }
}

/// A damaging hazard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub position: DVec2,
    pub extent: DVec2,

    // Patrol state
    pub patrol_start: DVec2,
    pub patrol_end: DVec2,
    pub patrol_speed: f64,
    pub moving_to_end: bool,

    // Rotation state
    pub rotation_deg: f64,
    pub rotation_speed_deg: f64,

    // Pulse state
    pub pulse_phase: f64,
    pub pulse_amplitude: f64,
}

impl Hazard {
    pub fn new(kind: HazardKind, position: DVec2, extent: DVec2) -> Self {
        Self {
            id: 0,
            kind,
            position,
            extent,
            patrol_start: position,
            patrol_end: position,
            patrol_speed: HAZARD_PATROL_SPEED,
            moving_to_end: true,
            rotation_deg: 0.0,
            rotation_speed_deg: HAZARD_ROTATION_SPEED_DEG,
            pulse_phase: 0.0,
            pulse_amplitude: HAZARD_PULSE_AMPLITUDE,
        }
    }

    /// Configure the ping-pong path for a patrol hazard.
    pub fn with_patrol(mut self, end: DVec2, speed: f64) -> Self {
        self.patrol_start = self.position;
        self.patrol_end = end;
        self.patrol_speed = speed;
        self
    }

    pub fn with_rotation_speed(mut self, deg_per_sec: f64) -> Self {
        self.rotation_speed_deg = deg_per_sec;
        self
    }

    /// Contact damage dealt to the orb.
    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }

    /// Advance animation and, for patrol hazards, position.
    pub fn update(&mut self, dt: f64) {
        match self.kind {
            HazardKind::Stationary => {}
            HazardKind::Patrol => self.update_patrol(dt),
            HazardKind::Rotating => {
                self.rotation_deg += self.rotation_speed_deg * dt;
                if self.rotation_deg >= 360.0 {
                    self.rotation_deg -= 360.0;
                }
            }
            HazardKind::Pulsing => {
                self.pulse_phase += dt * HAZARD_PULSE_RATE;
            }
        }
    }

    fn update_patrol(&mut self, dt: f64) {
        let target = if self.moving_to_end {
            self.patrol_end
        } else {
            self.patrol_start
        };
        let delta = target - self.position;
        let dist = delta.length();
        let step = self.patrol_speed * dt;
        if dist < step {
            self.position = target;
            self.moving_to_end = !self.moving_to_end;
        } else {
            self.position += delta / dist * step;
        }
    }

    /// Extent with the pulse effect applied (pulsing kind only).
    pub fn visual_extent(&self) -> DVec2 {
        if self.kind == HazardKind::Pulsing {
            self.extent * (1.0 + self.pulse_phase.sin() * self.pulse_amplitude)
        } else {
            self.extent
        }
    }

    /// The axis-aligned box the hazard occupies this tick. Pulsing
    /// hazards collide with their visual extent.
    pub fn bounds(&self) -> Rect {
        let extent = self.visual_extent();
        Rect::new(self.position.x, self.position.y, extent.x, extent.y)
    }

    /// Circle-vs-box overlap test against the current bounds.
    pub fn collides_with_circle(&self, center: DVec2, radius: f64) -> bool {
        self.bounds().intersects_circle(center, radius)
    }
}

/// A consumable buff pickup. Collecting one grants the matching ability
/// layer for `duration_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buff {
    pub id: u32,
    pub kind: BuffKind,
    pub position: DVec2,
    pub radius: f64,
    pub duration_secs: f64,
    pub collected: bool,
    pub spin_deg: f64,
    pub pulse_phase: f64,
    pub float_phase: f64,
}

impl Buff {
    pub fn new(kind: BuffKind, position: DVec2, duration_secs: f64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            radius: BUFF_RADIUS,
            duration_secs,
            collected: false,
            spin_deg: 0.0,
            pulse_phase: 0.0,
            float_phase: 0.0,
        }
    }

    pub fn with_phases(mut self, pulse: f64, float: f64) -> Self {
        self.pulse_phase = pulse;
        self.float_phase = float;
        self
    }

    /// Advance the animation.
    pub fn update(&mut self, dt: f64) {
        self.spin_deg += dt * BUFF_SPIN_RATE_DEG;
        if self.spin_deg >= 360.0 {
            self.spin_deg -= 360.0;
        }
        self.pulse_phase += dt * BUFF_PULSE_RATE;
        self.float_phase += dt * BUFF_FLOAT_RATE;
    }

    pub fn visual_radius(&self) -> f64 {
        self.radius + self.pulse_phase.sin() * 4.0
    }

    pub fn float_y(&self) -> f64 {
        self.position.y + self.float_phase.sin() * 8.0
    }

    /// Whether a point is within pickup range.
    pub fn in_range(&self, p: DVec2, range: f64) -> bool {
        self.position.distance(p) <= range + self.radius
    }
}
