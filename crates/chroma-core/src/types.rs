//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space.
/// Origin is the top-left corner; y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a point lies inside this rectangle (edges inclusive).
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Center of the rectangle.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The point on or inside this rectangle closest to `p`.
    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.x, self.x + self.width),
            p.y.clamp(self.y, self.y + self.height),
        )
    }

    /// Whether a circle overlaps this rectangle (closest-point test).
    pub fn intersects_circle(&self, center: DVec2, radius: f64) -> bool {
        let closest = self.closest_point(center);
        closest.distance_squared(center) < radius * radius
    }

    /// Clamp a circle center so the circle stays entirely inside the
    /// rectangle. Degenerate rectangles (smaller than the circle) collapse
    /// to the nearest representable point.
    pub fn clamp_circle(&self, center: DVec2, radius: f64) -> DVec2 {
        let min_x = self.x + radius;
        let max_x = (self.x + self.width - radius).max(min_x);
        let min_y = self.y + radius;
        let max_y = (self.y + self.height - radius).max(min_y);
        DVec2::new(center.x.clamp(min_x, max_x), center.y.clamp(min_y, max_y))
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
