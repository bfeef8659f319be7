//! Error types for structural misuse of the simulation data model.
//!
//! Only level-construction bugs are errors. Gameplay conditions that are
//! merely "not ready" (a special ability on cooldown, a paused session)
//! are expressed as enum results, never as errors.

use thiserror::Error;

/// Errors raised by chamber tree construction and lookup.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChamberError {
    /// A leaf chamber can never contain child chambers.
    #[error("leaf chamber {id} cannot contain child chambers")]
    LeafChild { id: u32 },

    /// The referenced chamber id does not belong to this tree.
    #[error("chamber {id} is not part of this tree")]
    UnknownChamber { id: u32 },
}
