//! Pattern lifecycle: generation, completion and the timed reset
//!
//! `Active` -> `Completing` happens once per generation. While completing,
//! targets are already gone but the smoke stays visible until the reset
//! delay runs out; then smoke is cleared and a new generation starts.

use super::emitter::CommandOutcome;
use super::state::{GameEvent, GamePhase, GameState};
use super::targets::{TargetPoint, TargetSet};
use crate::error::{Result, SmokeError};

/// Draw a pattern and start a new generation.
///
/// Refills the smoke reserve. On an empty library, or a drawn pattern with
/// no positions, the state is left `Idle` and the error is returned.
pub fn generate_pattern(state: &mut GameState) -> Result<()> {
    let picked = state
        .library
        .pick_random_pattern(&mut state.rng)
        .and_then(|pattern| {
            if pattern.positions.is_empty() {
                Err(SmokeError::EmptyPattern {
                    key: pattern.key.clone(),
                })
            } else {
                Ok(pattern.clone())
            }
        });
    let pattern = match picked {
        Ok(pattern) => pattern,
        Err(err) => {
            log::error!("Cannot generate pattern: {}", err);
            state.phase = GamePhase::Idle;
            return Err(err);
        }
    };

    state.generation += 1;
    let generation = state.generation;

    let mut points = Vec::with_capacity(pattern.positions.len());
    for pos in &pattern.positions {
        let id = state.next_entity_id();
        points.push(TargetPoint::new(id, *pos));
        state.events.push(GameEvent::TargetCreated { id, pos: *pos });
    }
    state.targets = TargetSet::new(generation, pattern.key.clone(), points);

    state.events.push(GameEvent::PatternGenerated {
        generation,
        key: pattern.key.clone(),
        targets: pattern.positions.len(),
    });

    state.emitter.refill();
    state.phase = GamePhase::Active;

    log::info!(
        "Generation {}: pattern '{}' with {} targets",
        generation,
        pattern.key,
        pattern.positions.len()
    );
    Ok(())
}

/// Release all live smoke
pub fn clear_smoke(state: &mut GameState) {
    for point in state.smoke.drain(..) {
        state.events.push(GameEvent::SmokeDespawned { id: point.id });
    }
}

/// Release all targets of the current generation
pub fn clear_targets(state: &mut GameState) {
    for id in state.targets.clear() {
        state.events.push(GameEvent::TargetRemoved { id });
    }
}

/// Pattern completed: clear targets and schedule the reset.
///
/// Ignored when a reset is already pending.
pub fn begin_completing(state: &mut GameState) -> CommandOutcome {
    if state.phase.is_reset_pending() {
        log::debug!("Completion ignored: reset already pending");
        return CommandOutcome::Ignored;
    }

    let generation = state.targets.generation();
    log::info!("Generation {} complete", generation);
    state.events.push(GameEvent::PatternCompleted { generation });

    clear_targets(state);
    state.phase = GamePhase::Completing {
        remaining: state.stats.reset_delay_seconds,
    };
    CommandOutcome::Applied
}

/// Count down a pending reset, regenerating when it runs out
pub fn advance_reset_timer(state: &mut GameState, dt: f32) -> Result<()> {
    let GamePhase::Completing { remaining } = state.phase else {
        return Ok(());
    };

    let remaining = remaining - dt;
    if remaining > 0.0 {
        state.phase = GamePhase::Completing { remaining };
        return Ok(());
    }

    clear_smoke(state);
    generate_pattern(state)
}

/// Clear everything and regenerate now.
///
/// Ignored while a timed reset is pending so only one new generation comes
/// out of a completion.
pub fn manual_reset(state: &mut GameState) -> Result<CommandOutcome> {
    if state.phase.is_reset_pending() {
        log::debug!("Manual reset ignored: reset already pending");
        return Ok(CommandOutcome::Ignored);
    }

    clear_smoke(state);
    clear_targets(state);
    generate_pattern(state)?;
    Ok(CommandOutcome::Applied)
}

/// Clear smoke and targets without regenerating.
///
/// A pending timed reset is not cancelled: the smoke goes now and the next
/// generation still arrives when the delay runs out.
pub fn manual_clear(state: &mut GameState) -> CommandOutcome {
    clear_smoke(state);
    clear_targets(state);
    if !state.phase.is_reset_pending() {
        state.phase = GamePhase::Idle;
    }
    CommandOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{KeyPattern, PatternLibrary};
    use crate::stats::GameStats;
    use glam::Vec2;

    fn state() -> GameState {
        let library = PatternLibrary::new(vec![
            KeyPattern::new("a", vec![Vec2::ZERO, Vec2::X]),
            KeyPattern::new("b", vec![Vec2::Y]),
        ]);
        let mut state = GameState::new(GameStats::default(), library, 3).unwrap();
        state.drain_events();
        state
    }

    #[test]
    fn test_begin_completing_once() {
        let mut state = state();
        state.spawn_smoke(Vec2::ZERO);
        let generation = state.generation;

        assert_eq!(begin_completing(&mut state), CommandOutcome::Applied);
        assert!(state.targets.is_empty());
        assert_eq!(state.smoke.len(), 1);
        assert_eq!(begin_completing(&mut state), CommandOutcome::Ignored);

        let events = state.drain_events();
        let completed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PatternCompleted { .. }))
            .count();
        assert_eq!(completed, 1);
        assert_eq!(state.generation, generation);
    }

    #[test]
    fn test_timer_regenerates_after_delay() {
        let mut state = state();
        state.spawn_smoke(Vec2::ZERO);
        begin_completing(&mut state);
        let generation = state.generation;

        advance_reset_timer(&mut state, 2.0).unwrap();
        assert!(state.phase.is_reset_pending());
        assert_eq!(state.smoke.len(), 1);

        advance_reset_timer(&mut state, 0.5).unwrap();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.generation, generation + 1);
        assert!(state.smoke.is_empty());
        assert!(!state.targets.is_empty());
    }

    #[test]
    fn test_manual_reset_ignored_while_pending() {
        let mut state = state();
        begin_completing(&mut state);
        let generation = state.generation;
        assert_eq!(manual_reset(&mut state).unwrap(), CommandOutcome::Ignored);
        assert_eq!(state.generation, generation);
        assert!(state.phase.is_reset_pending());
    }

    #[test]
    fn test_manual_reset_regenerates_and_refills() {
        let mut state = state();
        state.emitter.start();
        state.emitter.advance(0.0);
        assert!(state.emitter.reserve() < state.stats.smoke_drop.reserve_max_amount);

        let generation = state.generation;
        assert_eq!(manual_reset(&mut state).unwrap(), CommandOutcome::Applied);
        assert_eq!(state.generation, generation + 1);
        assert_eq!(state.emitter.reserve(), state.stats.smoke_drop.reserve_max_amount);
    }

    #[test]
    fn test_manual_clear_enters_idle() {
        let mut state = state();
        state.spawn_smoke(Vec2::ZERO);
        assert_eq!(manual_clear(&mut state), CommandOutcome::Applied);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.smoke.is_empty());
        assert!(state.targets.is_empty());
    }

    #[test]
    fn test_manual_clear_keeps_pending_reset() {
        let mut state = state();
        state.spawn_smoke(Vec2::ZERO);
        begin_completing(&mut state);
        let generation = state.generation;

        manual_clear(&mut state);
        assert!(state.smoke.is_empty());
        assert!(state.phase.is_reset_pending());

        advance_reset_timer(&mut state, 10.0).unwrap();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.generation, generation + 1);
    }

    #[test]
    fn test_empty_library_halts() {
        let mut state = state();
        state.library = PatternLibrary::default();
        let err = manual_reset(&mut state).unwrap_err();
        assert!(matches!(err, SmokeError::EmptyLibrary));
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_empty_pattern_halts_instead_of_hanging() {
        let mut state = state();
        state.library = PatternLibrary::new(vec![KeyPattern::new("hollow", Vec::new())]);
        let generation = state.generation;

        let err = manual_reset(&mut state).unwrap_err();
        assert!(matches!(err, SmokeError::EmptyPattern { ref key } if key == "hollow"));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.generation, generation);
        assert!(state.targets.is_empty());
    }
}
