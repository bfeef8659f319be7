//! Player commands sent from the input layer to the simulation.
//!
//! Commands are validated and queued for processing at the next tick
//! boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Element;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrbCommand {
    // --- Movement flags (independently settable) ---
    /// Press or release upward movement.
    SetMoveUp { pressed: bool },
    /// Press or release downward movement.
    SetMoveDown { pressed: bool },
    /// Press or release leftward movement.
    SetMoveLeft { pressed: bool },
    /// Press or release rightward movement.
    SetMoveRight { pressed: bool },

    // --- Elemental state ---
    /// Transmute to the named element. Naming the active element is a no-op.
    Transmute { element: Element },
    /// Trigger the active element's special ability (cooldown permitting).
    UseSpecial,

    // --- Session control ---
    /// Start (or restart) a session on the loaded level.
    StartSession,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
