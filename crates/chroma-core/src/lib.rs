//! Core types and definitions for the CHROMA simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry and time types, enums, commands, events, snapshot views,
//! constants, and error types. It has no dependency on any runtime
//! framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
