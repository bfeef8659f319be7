//! Headless demo driver: runs the campaign with a scripted pilot and
//! logs the event feed.
//!
//! Usage: `chroma [--seconds N] [--seed N] [--difficulty N]`

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chroma_core::commands::OrbCommand;
use chroma_core::enums::Element;

use chroma_app::game_loop::{spawn_session_loop, LoopCommand};
use chroma_app::session::SessionConfig;

fn main() {
    env_logger::init();

    let (run_secs, config) = parse_args();
    log::info!(
        "starting session: seed {} difficulty {} for {run_secs}s",
        config.seed,
        config.difficulty
    );

    let latest = Arc::new(Mutex::new(None));
    let tx = spawn_session_loop(config, Arc::clone(&latest));

    let _ = tx.send(LoopCommand::Orb(OrbCommand::StartSession));

    // Scripted pilot: wander the arena, rotate through the elements,
    // and fire the special on each. Runs until the time budget is spent.
    let script: &[&[OrbCommand]] = &[
        &[OrbCommand::SetMoveRight { pressed: true }],
        &[OrbCommand::SetMoveDown { pressed: true }],
        &[
            OrbCommand::SetMoveRight { pressed: false },
            OrbCommand::UseSpecial,
        ],
        &[
            OrbCommand::Transmute {
                element: Element::Water,
            },
            OrbCommand::SetMoveLeft { pressed: true },
        ],
        &[
            OrbCommand::SetMoveDown { pressed: false },
            OrbCommand::UseSpecial,
        ],
        &[
            OrbCommand::Transmute {
                element: Element::Earth,
            },
            OrbCommand::SetMoveUp { pressed: true },
        ],
        &[
            OrbCommand::Transmute {
                element: Element::Air,
            },
            OrbCommand::UseSpecial,
        ],
        &[
            OrbCommand::SetMoveLeft { pressed: false },
            OrbCommand::SetMoveRight { pressed: true },
            OrbCommand::Transmute {
                element: Element::Fire,
            },
        ],
        &[OrbCommand::SetMoveUp { pressed: false }],
    ];

    let started = Instant::now();
    let deadline = Duration::from_secs_f64(run_secs);
    let mut beat = 0usize;
    while started.elapsed() < deadline {
        for command in script[beat % script.len()] {
            if tx.send(LoopCommand::Orb(command.clone())).is_err() {
                break;
            }
        }
        beat += 1;
        std::thread::sleep(Duration::from_millis(500));
    }

    let _ = tx.send(LoopCommand::Shutdown);

    // Final summary from the last published snapshot.
    if let Some(snapshot) = latest.lock().ok().and_then(|lock| lock.clone()) {
        println!(
            "phase {:?} | level {} \"{}\" | score {} | essences {} | health {}/{} | {:.1}% cleared",
            snapshot.phase,
            snapshot.level_number,
            snapshot.level_name,
            snapshot.orb.score,
            snapshot.orb.essences_collected,
            snapshot.orb.health,
            snapshot.orb.max_health,
            snapshot.completion_percent,
        );
    } else {
        println!("no snapshot produced");
    }
}

fn parse_args() -> (f64, SessionConfig) {
    let mut run_secs = 10.0;
    let mut config = SessionConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let value = args.next();
        match (flag.as_str(), value) {
            ("--seconds", Some(v)) => run_secs = v.parse().unwrap_or(run_secs),
            ("--seed", Some(v)) => config.seed = v.parse().unwrap_or(config.seed),
            ("--difficulty", Some(v)) => {
                config.difficulty = v.parse().unwrap_or(config.difficulty)
            }
            (other, _) => {
                eprintln!("unknown option: {other}");
                eprintln!("usage: chroma [--seconds N] [--seed N] [--difficulty N]");
                std::process::exit(2);
            }
        }
    }

    (run_secs, config)
}
