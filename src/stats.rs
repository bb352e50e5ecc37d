//! Game tunables
//!
//! Loaded once from JSON and immutable for the lifetime of a run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmokeError};

/// Craft movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneStats {
    /// Forward speed (units/s)
    pub move_speed: f32,
    /// Maximum turn rate, in degrees per unit travelled
    pub turn_speed_max: f32,
}

impl Default for PlaneStats {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            turn_speed_max: 20.0,
        }
    }
}

/// Smoke reserve and emission cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeDropStats {
    /// Reserve capacity (refilled on every new pattern)
    pub reserve_max_amount: f32,
    /// Reserve spent per smoke point
    pub reserve_drop_amount: f32,
    /// Emission rate (points/s)
    pub reserve_drop_per_second: f32,
}

impl Default for SmokeDropStats {
    fn default() -> Self {
        Self {
            reserve_max_amount: 100.0,
            reserve_drop_amount: 1.0,
            reserve_drop_per_second: 12.0,
        }
    }
}

impl SmokeDropStats {
    /// Seconds between two emissions
    pub fn drop_interval(&self) -> f32 {
        1.0 / self.reserve_drop_per_second
    }
}

/// Matching tolerances
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreStats {
    /// Diameter within which a smoke point validates a target
    pub smoke_valid_range: f32,
    /// Finer diameter for "perfect" feedback (presentation only)
    pub smoke_perfect_range: f32,
}

impl Default for ScoreStats {
    fn default() -> Self {
        Self {
            smoke_valid_range: 1.0,
            smoke_perfect_range: 0.4,
        }
    }
}

/// All game tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    pub plane: PlaneStats,
    #[serde(default)]
    pub smoke_drop: SmokeDropStats,
    #[serde(default)]
    pub score: ScoreStats,
    /// Pause between a completed pattern and the next one
    #[serde(default = "default_reset_delay")]
    pub reset_delay_seconds: f32,
}

fn default_reset_delay() -> f32 {
    2.5
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            plane: PlaneStats::default(),
            smoke_drop: SmokeDropStats::default(),
            score: ScoreStats::default(),
            reset_delay_seconds: default_reset_delay(),
        }
    }
}

impl GameStats {
    /// Parse and validate from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let stats: Self = serde_json::from_str(json)?;
        stats.validate()?;
        Ok(stats)
    }

    /// Load and validate from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let stats = Self::from_json(&json)?;
        log::info!("Loaded stats from {}", path.as_ref().display());
        Ok(stats)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f32, bool); 8] = [
            ("plane.move_speed", self.plane.move_speed, self.plane.move_speed >= 0.0),
            (
                "plane.turn_speed_max",
                self.plane.turn_speed_max,
                self.plane.turn_speed_max >= 0.0,
            ),
            (
                "smoke_drop.reserve_max_amount",
                self.smoke_drop.reserve_max_amount,
                self.smoke_drop.reserve_max_amount >= 0.0,
            ),
            (
                "smoke_drop.reserve_drop_amount",
                self.smoke_drop.reserve_drop_amount,
                self.smoke_drop.reserve_drop_amount >= 0.0,
            ),
            (
                "smoke_drop.reserve_drop_per_second",
                self.smoke_drop.reserve_drop_per_second,
                self.smoke_drop.reserve_drop_per_second > 0.0,
            ),
            (
                "score.smoke_valid_range",
                self.score.smoke_valid_range,
                self.score.smoke_valid_range >= 0.0,
            ),
            (
                "score.smoke_perfect_range",
                self.score.smoke_perfect_range,
                self.score.smoke_perfect_range >= 0.0,
            ),
            (
                "reset_delay_seconds",
                self.reset_delay_seconds,
                self.reset_delay_seconds >= 0.0,
            ),
        ];

        // NaN fails every comparison above, so it is rejected too
        match checks.iter().find(|(_, _, ok)| !ok) {
            Some(&(name, value, _)) => Err(SmokeError::InvalidStat { name, value }),
            None => Ok(()),
        }
    }

    /// Spacing between consecutive smoke points at full speed
    pub fn smoke_drop_distance(&self) -> f32 {
        self.plane.move_speed / self.smoke_drop.reserve_drop_per_second
    }

    /// Squared validation radius (the range is a diameter)
    #[inline]
    pub fn valid_radius_sq(&self) -> f32 {
        let r = self.score.smoke_valid_range / 2.0;
        r * r
    }

    /// Squared "perfect" radius
    #[inline]
    pub fn perfect_radius_sq(&self) -> f32 {
        let r = self.score.smoke_perfect_range / 2.0;
        r * r
    }
}
