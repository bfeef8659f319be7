//! Simulation engine — the core of the game.
//!
//! Owns the chamber tree, the orb, the event bus, and the fixed-order
//! per-tick systems. Completely headless (no window, input, or render
//! dependency), enabling deterministic testing: the same command
//! sequence over the same level always produces the same snapshots.

pub mod abilities;
pub mod bus;
pub mod chamber;
pub mod engine;
pub mod level;
pub mod objective;
pub mod objects;
pub mod orb;
pub mod systems;

#[cfg(test)]
mod tests;
