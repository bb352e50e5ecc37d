//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::emitter::SmokeEmitter;
use super::targets::TargetSet;
use crate::error::Result;
use crate::pattern::PatternLibrary;
use crate::stats::{GameStats, PlaneStats};

/// Pattern lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Matching enabled against the current generation
    Active,
    /// Pattern completed; targets are gone, smoke stays until the timer ends
    Completing { remaining: f32 },
    /// Free drawing: no targets, no matching, until a manual reset
    Idle,
}

impl GamePhase {
    pub fn is_reset_pending(&self) -> bool {
        matches!(self, GamePhase::Completing { .. })
    }
}

/// An emitted smoke particle, fixed at its spawn position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokePoint {
    pub id: u32,
    pub pos: Vec2,
}

/// The steered craft that lays the smoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub pos: Vec2,
    /// Unit heading
    pub heading: Vec2,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            heading: Vec2::Y,
        }
    }
}

impl Plane {
    /// Turn then move forward one step.
    ///
    /// `turn` in [-1, 1]; positive turns clockwise. The turn angle scales
    /// with speed so the turning radius stays constant.
    pub fn fly(&mut self, turn: f32, stats: &PlaneStats, dt: f32) {
        let turn = turn.clamp(-1.0, 1.0) * stats.turn_speed_max;
        let angle = (turn * stats.move_speed * dt).to_radians();
        if angle != 0.0 {
            self.heading = Vec2::from_angle(-angle).rotate(self.heading).normalize_or(Vec2::Y);
        }
        self.pos += self.heading * stats.move_speed * dt;
    }
}

/// Outward notification for rendering/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SmokeSpawned { id: u32, pos: Vec2 },
    SmokeDespawned { id: u32 },
    TargetCreated { id: u32, pos: Vec2 },
    TargetValidated { id: u32, smoke_id: u32, perfect: bool },
    TargetRemoved { id: u32 },
    PatternGenerated { generation: u32, key: String, targets: usize },
    PatternCompleted { generation: u32 },
    ReserveExhausted,
}

/// Read-only counters for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub validated_count: usize,
    pub total_targets: usize,
    pub reset_pending: bool,
    pub reserve: f32,
    pub infinite_reserve: bool,
    pub generation: u32,
    pub phase: GamePhase,
}

/// Complete simulation state
///
/// Configuration, the library, the target set, the smoke and the reserve are
/// owned by the core and only change through `tick` and the lifecycle
/// operations. Collaborators read them through the accessors.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The craft; input and scripted drivers may place it freely
    pub plane: Plane,
    pub(crate) stats: GameStats,
    pub(crate) library: PatternLibrary,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) phase: GamePhase,
    pub(crate) emitter: SmokeEmitter,
    /// Live smoke in spawn order
    pub(crate) smoke: Vec<SmokePoint>,
    pub(crate) targets: TargetSet,
    /// Notifications produced since the last drain
    pub(crate) events: Vec<GameEvent>,
    /// Number of generations started
    pub(crate) generation: u32,
    next_id: u32,
}

impl GameState {
    /// Build a state and generate the first pattern.
    ///
    /// Fails if the stats are invalid, the library is empty or any pattern
    /// has no positions.
    pub fn new(stats: GameStats, library: PatternLibrary, seed: u64) -> Result<Self> {
        stats.validate()?;
        library.validate()?;
        let emitter = SmokeEmitter::new(&stats.smoke_drop);
        let mut state = Self {
            seed,
            plane: Plane::default(),
            stats,
            library,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Idle,
            emitter,
            smoke: Vec::new(),
            targets: TargetSet::default(),
            events: Vec::new(),
            generation: 0,
            next_id: 1,
        };

        super::lifecycle::generate_pattern(&mut state)?;

        Ok(state)
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn emitter(&self) -> &SmokeEmitter {
        &self.emitter
    }

    /// Live smoke in spawn order
    pub fn smoke(&self) -> &[SmokePoint] {
        &self.smoke
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Record a smoke point at `pos`
    pub(crate) fn spawn_smoke(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.smoke.push(SmokePoint { id, pos });
        self.events.push(GameEvent::SmokeSpawned { id, pos });
        id
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn status(&self) -> StatusView {
        StatusView {
            validated_count: self.targets.validated_count(),
            total_targets: self.targets.len(),
            reset_pending: self.phase.is_reset_pending(),
            reserve: self.emitter.reserve(),
            infinite_reserve: self.emitter.is_infinite(),
            generation: self.generation,
            phase: self.phase,
        }
    }
}
