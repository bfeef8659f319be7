//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Color tag carried by every essence particle.
///
/// Each elemental state can absorb exactly two of these colors; the
/// pairing lives in `chroma-elements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EssenceColor {
    Red,
    Orange,
    Blue,
    Cyan,
    Green,
    Brown,
    White,
    Yellow,
}

impl EssenceColor {
    pub const ALL: [EssenceColor; 8] = [
        EssenceColor::Red,
        EssenceColor::Orange,
        EssenceColor::Blue,
        EssenceColor::Cyan,
        EssenceColor::Green,
        EssenceColor::Brown,
        EssenceColor::White,
        EssenceColor::Yellow,
    ];

    /// Display color for rendering.
    pub fn color_hex(self) -> &'static str {
        match self {
            EssenceColor::Red => "#FF0000",
            EssenceColor::Orange => "#FF8C00",
            EssenceColor::Blue => "#0066FF",
            EssenceColor::Cyan => "#00FFFF",
            EssenceColor::Green => "#00FF00",
            EssenceColor::Brown => "#8B4513",
            EssenceColor::White => "#FFFFFF",
            EssenceColor::Yellow => "#FFD700",
        }
    }

    /// Glow color for halo effects.
    pub fn glow_hex(self) -> &'static str {
        match self {
            EssenceColor::Red => "#FF6666",
            EssenceColor::Orange => "#FFB366",
            EssenceColor::Blue => "#6699FF",
            EssenceColor::Cyan => "#66FFFF",
            EssenceColor::Green => "#66FF66",
            EssenceColor::Brown => "#CD853F",
            EssenceColor::White => "#FFFFCC",
            EssenceColor::Yellow => "#FFEB66",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EssenceColor::Red => "RED",
            EssenceColor::Orange => "ORANGE",
            EssenceColor::Blue => "BLUE",
            EssenceColor::Cyan => "CYAN",
            EssenceColor::Green => "GREEN",
            EssenceColor::Brown => "BROWN",
            EssenceColor::White => "WHITE",
            EssenceColor::Yellow => "YELLOW",
        }
    }
}

/// Hazard behavior kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Fixed barrier.
    #[default]
    Stationary,
    /// Ping-pongs between two endpoints.
    Patrol,
    /// Spins in place.
    Rotating,
    /// Grows and shrinks around its base extent.
    Pulsing,
}

impl HazardKind {
    /// Contact damage dealt to the orb.
    pub fn damage(self) -> i32 {
        match self {
            HazardKind::Stationary => 10,
            HazardKind::Patrol => 15,
            HazardKind::Rotating => 20,
            HazardKind::Pulsing => 12,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HazardKind::Stationary => "Static Barrier",
            HazardKind::Patrol => "Moving Hazard",
            HazardKind::Rotating => "Rotating Spike",
            HazardKind::Pulsing => "Pulsing Field",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            HazardKind::Stationary => "#444444",
            HazardKind::Patrol => "#FF4444",
            HazardKind::Rotating => "#AA00AA",
            HazardKind::Pulsing => "#FFAA00",
        }
    }
}

/// Buff pickup kind. Each kind grants exactly one ability layer of the
/// same name, so this enum doubles as the layer tag in the ability stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuffKind {
    SpeedBoost,
    Shield,
    Magnet,
    MultiAbsorb,
    ScoreMultiplier,
    RangeBoost,
}

impl BuffKind {
    pub const ALL: [BuffKind; 6] = [
        BuffKind::SpeedBoost,
        BuffKind::Shield,
        BuffKind::Magnet,
        BuffKind::MultiAbsorb,
        BuffKind::ScoreMultiplier,
        BuffKind::RangeBoost,
    ];

    /// Layer name used in events and HUD listings.
    pub fn layer_name(self) -> &'static str {
        match self {
            BuffKind::SpeedBoost => "SpeedBoost",
            BuffKind::Shield => "Shield",
            BuffKind::Magnet => "Magnet",
            BuffKind::MultiAbsorb => "MultiAbsorb",
            BuffKind::ScoreMultiplier => "ScoreMultiplier",
            BuffKind::RangeBoost => "RangeBoost",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BuffKind::SpeedBoost => "Speed Boost",
            BuffKind::Shield => "Shield",
            BuffKind::Magnet => "Magnet",
            BuffKind::MultiAbsorb => "Multi-Absorb",
            BuffKind::ScoreMultiplier => "Score x2",
            BuffKind::RangeBoost => "Range Boost",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            BuffKind::SpeedBoost => "#00FF00",
            BuffKind::Shield => "#0088FF",
            BuffKind::Magnet => "#FF00FF",
            BuffKind::MultiAbsorb => "#FFFF00",
            BuffKind::ScoreMultiplier => "#FF8800",
            BuffKind::RangeBoost => "#00FFFF",
        }
    }
}

/// Elemental state of the orb. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[default]
    Fire,
    Water,
    Earth,
    Air,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Air];

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "FIRE",
            Element::Water => "WATER",
            Element::Earth => "EARTH",
            Element::Air => "AIR",
        }
    }
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Victory,
}
