//! Per-tick matching of live smoke against unvalidated targets

use super::state::{GameEvent, SmokePoint};
use super::targets::TargetSet;

/// Fewer live smoke points than this and matching does not run
pub const MIN_SMOKE_FOR_MATCHING: usize = 2;

/// Squared radii used by one matching pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRadii {
    /// Inclusive validation radius, squared
    pub valid_sq: f32,
    /// Inclusive "perfect" radius, squared. Feedback only.
    pub perfect_sq: f32,
}

/// What one matching pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No targets, or not enough smoke
    Skipped,
    /// Matching ran; `validated` targets changed state this tick
    Progress { validated: usize },
    /// Every target was already validated when the tick started
    Complete,
}

/// Run one matching pass.
///
/// Completion is only detected at the start of a pass, so the tick that
/// validates the last target reports `Progress` and the following tick
/// reports `Complete`. Each smoke point validates at most one target per
/// pass, the earliest unvalidated target in set order within range. Smoke is
/// never consumed and is tried again on later passes.
pub fn match_smoke(
    smoke: &[SmokePoint],
    targets: &mut TargetSet,
    radii: MatchRadii,
    events: &mut Vec<GameEvent>,
) -> MatchOutcome {
    if targets.is_empty() || smoke.len() < MIN_SMOKE_FOR_MATCHING {
        return MatchOutcome::Skipped;
    }

    if targets.is_complete() {
        return MatchOutcome::Complete;
    }

    let mut validated = 0;
    let mut remaining = targets.unvalidated_count();
    for point in smoke {
        if remaining == 0 {
            break;
        }

        let hit = targets.targets_mut().iter_mut().find(|t| {
            !t.is_validated() && t.pos().distance_squared(point.pos) <= radii.valid_sq
        });

        if let Some(target) = hit {
            let perfect = target.pos().distance_squared(point.pos) <= radii.perfect_sq;
            if target.validate(point.id, perfect) {
                events.push(GameEvent::TargetValidated {
                    id: target.id(),
                    smoke_id: point.id,
                    perfect,
                });
                validated += 1;
                remaining -= 1;
            }
        }
    }

    MatchOutcome::Progress { validated }
}
