//! Rate-limited smoke emission gated by a depletable reserve

use serde::{Deserialize, Serialize};

use crate::stats::SmokeDropStats;

/// Maximum drops in one tick, for very large dt
pub const MAX_DROPS_PER_TICK: u32 = 8;

/// Result of a discrete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied,
    /// Request made no sense in the current state and was dropped
    Ignored,
}

/// Observable emitter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterStatus {
    Idle,
    Emitting,
    /// Reserve is empty and infinite mode is off
    Exhausted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeEmitter {
    reserve: f32,
    reserve_max: f32,
    drop_amount: f32,
    /// Seconds between drops
    interval: f32,
    infinite: bool,
    emitting: bool,
    /// Seconds until the next drop is due
    cooldown: f32,
}

impl SmokeEmitter {
    pub fn new(stats: &SmokeDropStats) -> Self {
        Self {
            reserve: stats.reserve_max_amount,
            reserve_max: stats.reserve_max_amount,
            drop_amount: stats.reserve_drop_amount,
            interval: stats.drop_interval(),
            infinite: false,
            emitting: false,
            cooldown: 0.0,
        }
    }

    pub fn reserve(&self) -> f32 {
        self.reserve
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    pub fn status(&self) -> EmitterStatus {
        if !self.can_drop() {
            EmitterStatus::Exhausted
        } else if self.is_emitting() {
            EmitterStatus::Emitting
        } else {
            EmitterStatus::Idle
        }
    }

    fn can_drop(&self) -> bool {
        self.infinite || self.reserve > 0.0
    }

    /// Begin emitting; the first drop happens on the next advance
    pub fn start(&mut self) -> CommandOutcome {
        if self.emitting {
            return CommandOutcome::Ignored;
        }
        self.emitting = true;
        self.cooldown = 0.0;
        CommandOutcome::Applied
    }

    /// Stop emitting. Already dropped smoke is unaffected.
    pub fn stop(&mut self) -> CommandOutcome {
        if !self.emitting {
            return CommandOutcome::Ignored;
        }
        self.emitting = false;
        self.cooldown = 0.0;
        CommandOutcome::Applied
    }

    /// Flip infinite mode, returning the new value
    pub fn toggle_infinite(&mut self) -> bool {
        self.infinite = !self.infinite;
        log::warn!(
            "Infinite smoke reserve {}",
            if self.infinite { "ON" } else { "OFF" }
        );
        self.infinite
    }

    pub fn refill(&mut self) {
        self.reserve = self.reserve_max;
    }

    /// Advance the cadence by `dt`, returning how many drops are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.emitting {
            return 0;
        }

        let mut drops = 0;
        while self.cooldown <= 0.0 && self.can_drop() && drops < MAX_DROPS_PER_TICK {
            if !self.infinite {
                self.reserve = (self.reserve - self.drop_amount).max(0.0);
            }
            self.cooldown += self.interval;
            drops += 1;
        }

        if !self.can_drop() {
            // Resume immediately once refilled instead of bursting
            self.cooldown = 0.0;
            return drops;
        }

        self.cooldown -= dt;
        drops
    }
}
