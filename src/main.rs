//! Smoke Trail headless driver
//!
//! Usage: `smoke-trail [stats.json] [patterns.json]`
//!
//! Flies a scripted loop with the smoke held down and logs every event the
//! simulation produces. Run with `RUST_LOG=info` (or `debug`).

use glam::Vec2;

use smoke_trail::consts::{MAX_SUBSTEPS, SIM_DT};
use smoke_trail::geometry::PatternShape;
use smoke_trail::sim::{Command, GameEvent, GameState, TickInput, tick};
use smoke_trail::{GameStats, KeyPattern, PatternLibrary, Result};

/// Frame time of the simulated host loop (30 fps)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Simulated run length in seconds
const RUN_SECONDS: f32 = 20.0;

fn main() {
    env_logger::init();
    log::info!("Smoke Trail (headless) starting...");

    if let Err(err) = run() {
        if err.is_configuration() {
            log::error!("Configuration error: {}", err);
        } else {
            log::error!("{}", err);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let stats = match args.next() {
        Some(path) => GameStats::load(path)?,
        None => GameStats::default(),
    };
    let library = match args.next() {
        Some(path) => PatternLibrary::load(path)?,
        None => builtin_library(&stats),
    };

    let mut state = GameState::new(stats, library, 0x5eed)?;
    let mut pending = vec![Command::EmitStart];
    let mut accumulator = 0.0;
    let mut elapsed = 0.0;

    while elapsed < RUN_SECONDS {
        accumulator += FRAME_DT;
        elapsed += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                turn: 1.0,
                commands: std::mem::take(&mut pending),
            };
            tick(&mut state, &input, SIM_DT)?;
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in state.drain_events() {
            log_event(&event);
        }
    }

    let status = state.status();
    log::info!(
        "Finished after {} ticks: generation {}, {}/{} targets, reserve {:.1}",
        state.time_ticks(),
        status.generation,
        status.validated_count,
        status.total_targets,
        status.reserve
    );
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::SmokeSpawned { .. } | GameEvent::SmokeDespawned { .. } => {
            log::trace!("{:?}", event)
        }
        GameEvent::TargetValidated { perfect: true, .. } => log::info!("Perfect! {:?}", event),
        _ => log::info!("{:?}", event),
    }
}

/// A ring the scripted full-lock turn traces, plus a half ring.
///
/// At full lock the craft turns `turn_speed_max * move_speed` degrees per
/// second, so its turning radius is `move_speed / omega`.
fn builtin_library(stats: &GameStats) -> PatternLibrary {
    let omega = (stats.plane.turn_speed_max * stats.plane.move_speed).to_radians();
    let radius = if omega > 0.0 {
        stats.plane.move_speed / omega
    } else {
        1.0
    };
    let mirror = Vec2::new(2.0 * radius, 0.0);

    let ring = PatternShape::Arc {
        a: Vec2::ZERO,
        b: mirror,
        points: 12,
        arc_fraction: 1.0,
    };
    let half = PatternShape::Arc {
        a: Vec2::ZERO,
        b: mirror,
        points: 12,
        arc_fraction: 0.5,
    };
    let spacing = stats.smoke_drop_distance();

    PatternLibrary::new(vec![
        KeyPattern::new("ring", ring.sample(spacing)),
        KeyPattern::new("half-ring", half.sample(spacing)),
    ])
}
