//! Headless driver for the CHROMA simulation: the fixed-timestep game
//! loop thread and the session layer that advances levels.

pub mod game_loop;
pub mod session;
