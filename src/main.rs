//! Asteroids headless driver
//!
//! Runs a session against the in-memory surface with a simple autopilot and
//! logs the outcome. Usage: `asteroids [seed] [settings.json]`

use asteroids_core::Settings;
use asteroids_core::platform::HeadlessSurface;
use asteroids_core::sim::{Command, GamePhase, Session};

/// Simulated play time (ms)
const RUN_MS: u64 = 120_000;
/// Autopilot decision period (ms)
const PILOT_STEP_MS: u64 = 50;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let settings = match args.next() {
        Some(path) => Settings::load(&path).unwrap_or_else(|err| {
            log::warn!("{err}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    let surface = HeadlessSurface::new(800.0, 600.0);
    let mut session = match Session::new(surface, settings, seed) {
        Ok(session) => session,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    session.handle_command(Command::Start);

    let mut elapsed = 0;
    while elapsed < RUN_MS && session.phase() == GamePhase::Playing {
        let step = elapsed / PILOT_STEP_MS;
        // Sweep the gun around, nudging forward now and then
        if step % 10 == 0 {
            session.handle_command(Command::RotateRight);
        }
        if step % 40 == 0 {
            session.handle_command(Command::SpeedUp);
        }
        session.handle_command(Command::Fire);

        session.run_for(PILOT_STEP_MS);
        elapsed += PILOT_STEP_MS;
    }

    let snapshot = session.snapshot();
    session.shutdown();
    log::info!(
        "Finished after {} ms: {:?}, score {}, lives {}",
        snapshot.time_ms,
        snapshot.phase,
        snapshot.score,
        snapshot.lives
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => log::info!("Final state: {json}"),
        Err(err) => log::error!("Failed to serialize final state: {err}"),
    }
}
