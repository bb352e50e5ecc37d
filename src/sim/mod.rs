//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for smoke, pattern order for targets)
//! - No rendering or input-device dependencies; collaborators read
//!   [`GameEvent`]s and [`StatusView`]

pub mod emitter;
pub mod lifecycle;
pub mod matching;
pub mod state;
pub mod targets;
pub mod tick;

pub use emitter::{CommandOutcome, EmitterStatus, SmokeEmitter};
pub use matching::{MatchOutcome, MatchRadii, match_smoke};
pub use state::{GameEvent, GamePhase, GameState, Plane, SmokePoint, StatusView};
pub use targets::{TargetPoint, TargetSet};
pub use tick::{Command, TickInput, apply_command, tick};
