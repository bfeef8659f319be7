//! Per-tick systems, run in a fixed order by the engine:
//!
//! 1. `movement` — advance the orb, clamp to the arena
//! 2. chamber tree update (content animation; on the tree itself)
//! 3. `absorption` — magnet pull + essence absorption
//! 4. `hazards` — overlap damage
//! 5. `buffs` — pickup collection and layer grants
//! 6. `objectives` — aggregate-count checks and bonus awards
//! 7. `completion` — level-cleared detection
//!
//! The order is part of the engine's contract; changing it changes
//! observable results.

pub mod absorption;
pub mod buffs;
pub mod completion;
pub mod hazards;
pub mod movement;
pub mod objectives;
pub mod snapshot;
