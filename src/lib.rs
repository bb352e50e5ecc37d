//! Smoke Trail - fly a craft, lay smoke, cover the pattern
//!
//! Core modules:
//! - `sim`: Deterministic simulation (emission, matching, pattern lifecycle)
//! - `pattern`: Pattern library the simulation draws from
//! - `stats`: Data-driven tunables
//! - `geometry`: Point sampling used when authoring patterns

pub mod error;
pub mod geometry;
pub mod pattern;
pub mod sim;
pub mod stats;

pub use error::{Result, SmokeError};
pub use pattern::{KeyPattern, PatternLibrary};
pub use stats::GameStats;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
