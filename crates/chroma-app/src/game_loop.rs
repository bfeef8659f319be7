//! Game loop thread — drives the session at a fixed timestep.
//!
//! The session is created inside the thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel; the latest snapshot
//! is stored in shared state for synchronous polling. Wall-clock time
//! is accumulated and converted into zero or more fixed `DT` steps per
//! frame, with any single elapsed sample capped to avoid a runaway
//! catch-up spiral.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chroma_core::commands::OrbCommand;
use chroma_core::constants::{DT, MAX_FRAME_SECS};
use chroma_core::state::GameSnapshot;

use crate::session::{Session, SessionConfig};

/// Commands accepted by the loop thread.
#[derive(Debug, Clone)]
pub enum LoopCommand {
    Orb(OrbCommand),
    Shutdown,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input layer to use.
pub fn spawn_session_loop(
    config: SessionConfig,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
) -> mpsc::Sender<LoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    std::thread::Builder::new()
        .name("chroma-game-loop".into())
        .spawn(move || {
            run_session_loop(config, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_session_loop(
    config: SessionConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
) {
    let mut session = Session::new(config);
    let mut last = Instant::now();
    let mut accumulator = 0.0;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Orb(cmd)) => session.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Convert elapsed wall-clock time into fixed steps
        let now = Instant::now();
        let frame = now.duration_since(last).as_secs_f64();
        last = now;
        let steps = consume_frame(&mut accumulator, frame);

        // 3. Step the session and publish the newest snapshot
        let mut newest = None;
        for _ in 0..steps {
            newest = Some(session.step());
        }
        if let Some(snapshot) = newest {
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }

        // 4. Sleep until the next tick is due
        let wait = (DT - accumulator).max(0.001);
        std::thread::sleep(Duration::from_secs_f64(wait));
    }
}

/// Cap a wall-clock sample and fold it into the accumulator, returning
/// how many fixed steps are now due.
fn consume_frame(accumulator: &mut f64, frame_secs: f64) -> u32 {
    *accumulator += frame_secs.min(MAX_FRAME_SECS);
    let mut steps = 0;
    while *accumulator >= DT {
        *accumulator -= DT;
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::constants::TICK_RATE;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Orb(OrbCommand::StartSession)).unwrap();
        tx.send(LoopCommand::Orb(OrbCommand::Pause)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Orb(OrbCommand::StartSession)
        ));
        assert!(matches!(commands[1], LoopCommand::Orb(OrbCommand::Pause)));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_small_frames_accumulate_into_steps() {
        let mut acc = 0.0;
        let mut total = 0;
        // Quarter-tick samples adding up to one simulated second.
        for _ in 0..TICK_RATE * 4 {
            total += consume_frame(&mut acc, DT / 4.0);
        }
        // Allow one step of float slack across 240 accumulations.
        assert!(
            total == TICK_RATE || total == TICK_RATE - 1,
            "expected ~{TICK_RATE} steps, got {total}"
        );
        assert!(acc < DT);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let cap_steps = (MAX_FRAME_SECS / DT).round() as u32;

        let mut acc = 0.0;
        // A two-second stall may only produce a quarter-second of catch-up.
        let steps = consume_frame(&mut acc, 2.0);
        assert!(
            steps <= cap_steps && steps >= cap_steps - 1,
            "expected ~{cap_steps} steps, got {steps}"
        );

        // And the cap applies per sample, not cumulatively.
        let steps_again = consume_frame(&mut acc, 2.0);
        assert!(steps_again <= cap_steps);
        assert!(steps_again >= cap_steps - 1);
    }

    #[test]
    fn test_zero_elapsed_zero_steps() {
        let mut acc = 0.0;
        assert_eq!(consume_frame(&mut acc, 0.0), 0);
        assert_eq!(acc, 0.0);
    }
}
