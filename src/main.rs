//! Asteroids headless runner
//!
//! Drives a session with the demo pilot and logs what happens. Rendering,
//! audio and real keyboard input live outside this crate.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use asteroids::Session;
use asteroids::autopilot::Autopilot;
use asteroids::settings::Settings;
use asteroids::sim::GameEvent;
use clap::Parser;

/// Headless Asteroids driven by the demo pilot
#[derive(Debug, Parser)]
#[command(name = "asteroids")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed (defaults to the settings file, then the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 900)]
    ticks: u64,

    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pace ticks against the wall clock
    #[arg(long)]
    realtime: bool,

    /// Print the final render snapshot as JSON
    #[arg(long)]
    dump: bool,
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let settings = Settings::load_or_default(args.config.as_deref());
    let seed = args.seed.or(settings.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Asteroids (headless) starting, seed {}", seed);

    let mut session = Session::new(&settings, Some(seed));
    let mut pilot = Autopilot::new();
    let mut rounds = 0u32;
    let mut best_score = 0u64;
    let mut destroyed = 0u32;

    for _ in 0..args.ticks {
        for event in pilot.drive(session.snapshot()) {
            session.push(event);
        }

        if args.realtime {
            std::thread::sleep(session.tick_interval());
            session.advance(session.tick_interval());
        } else {
            session.step();
        }

        for event in session.drain_events() {
            match event {
                GameEvent::RoundStarted { .. } => rounds += 1,
                GameEvent::AsteroidDestroyed { .. } => destroyed += 1,
                GameEvent::ShipCrashed { score } => best_score = best_score.max(score),
                _ => {}
            }
            log::debug!("{:?}", event);
        }
    }

    let snapshot = session.snapshot();
    best_score = best_score.max(snapshot.score);
    log::info!(
        "Ran {} ticks: {} rounds, {} asteroids destroyed, best score {}",
        snapshot.tick,
        rounds,
        destroyed,
        best_score
    );
    println!(
        "ticks={} rounds={} destroyed={} best_score={} phase={:?}",
        snapshot.tick, rounds, destroyed, best_score, snapshot.phase
    );

    if args.dump {
        match serde_json::to_string_pretty(snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => log::warn!("Failed to serialize snapshot: {err}"),
        }
    }
}
