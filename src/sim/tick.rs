//! Fixed timestep simulation tick
//!
//! Order within a tick: queued commands, reset timer, flight, emission,
//! matching. Smoke emitted this tick is visible to this tick's matching.

use serde::{Deserialize, Serialize};

use super::emitter::{CommandOutcome, EmitterStatus};
use super::lifecycle;
use super::matching::{MatchOutcome, MatchRadii, match_smoke};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::Result;

/// Discrete requests from the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    EmitStart,
    EmitStop,
    ToggleInfiniteReserve,
    /// Clear and regenerate immediately
    ManualReset,
    /// Clear smoke and targets, then free-draw
    ManualClear,
    /// Clear smoke only
    ClearSmoke,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering in [-1, 1], positive is clockwise
    pub turn: f32,
    /// Commands queued since the previous tick, applied in order
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn with_commands(commands: impl Into<Vec<Command>>) -> Self {
        Self {
            turn: 0.0,
            commands: commands.into(),
        }
    }
}

/// Apply one command at the tick boundary
pub fn apply_command(state: &mut GameState, command: Command) -> Result<CommandOutcome> {
    let outcome = match command {
        Command::EmitStart => state.emitter.start(),
        Command::EmitStop => state.emitter.stop(),
        Command::ToggleInfiniteReserve => {
            state.emitter.toggle_infinite();
            CommandOutcome::Applied
        }
        Command::ManualReset => lifecycle::manual_reset(state)?,
        Command::ManualClear => lifecycle::manual_clear(state),
        Command::ClearSmoke => {
            lifecycle::clear_smoke(state);
            CommandOutcome::Applied
        }
    };

    if outcome == CommandOutcome::Ignored {
        log::debug!("{:?} ignored", command);
    }
    Ok(outcome)
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<()> {
    let mut reset_done = false;
    for &command in &input.commands {
        // Repeated resets in one tick window yield a single generation
        if command == Command::ManualReset {
            if reset_done {
                log::debug!("Duplicate manual reset in tick {} ignored", state.time_ticks);
                continue;
            }
            reset_done = apply_command(state, command)? == CommandOutcome::Applied;
            continue;
        }
        apply_command(state, command)?;
    }

    state.time_ticks += 1;

    lifecycle::advance_reset_timer(state, dt)?;

    state.plane.fly(input.turn, &state.stats.plane, dt);

    let was_exhausted = state.emitter.status() == EmitterStatus::Exhausted;
    let drops = state.emitter.advance(dt);
    let pos = state.plane.pos;
    for _ in 0..drops {
        state.spawn_smoke(pos);
    }
    if !was_exhausted && state.emitter.status() == EmitterStatus::Exhausted {
        log::debug!("Smoke reserve exhausted");
        state.events.push(GameEvent::ReserveExhausted);
    }

    if state.phase == GamePhase::Active {
        let radii = MatchRadii {
            valid_sq: state.stats.valid_radius_sq(),
            perfect_sq: state.stats.perfect_radius_sq(),
        };
        let outcome = match_smoke(&state.smoke, &mut state.targets, radii, &mut state.events);
        if outcome == MatchOutcome::Complete {
            lifecycle::begin_completing(state);
        }
    }

    Ok(())
}
