//! Target points of one pattern generation

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A position that must be covered by smoke.
///
/// Validation is one-way: once set, it stays until the whole set is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    id: u32,
    pos: Vec2,
    validated_by: Option<u32>,
    perfect: bool,
}

impl TargetPoint {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            validated_by: None,
            perfect: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn is_validated(&self) -> bool {
        self.validated_by.is_some()
    }

    /// Smoke point that validated this target
    pub fn validated_by(&self) -> Option<u32> {
        self.validated_by
    }

    /// Validating smoke lay within the perfect radius
    pub fn is_perfect(&self) -> bool {
        self.perfect
    }

    /// Mark as validated. Returns false if it already was.
    pub fn validate(&mut self, smoke_id: u32, perfect: bool) -> bool {
        if self.validated_by.is_some() {
            return false;
        }
        self.validated_by = Some(smoke_id);
        self.perfect = perfect;
        true
    }
}

/// Ordered targets of the active generation (empty when cleared)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSet {
    generation: u32,
    key: String,
    targets: Vec<TargetPoint>,
}

impl TargetSet {
    pub fn new(generation: u32, key: impl Into<String>, targets: Vec<TargetPoint>) -> Self {
        Self {
            generation,
            key: key.into(),
            targets,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Key of the pattern this set was built from
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetPoint> {
        self.targets.iter()
    }

    pub fn get(&self, id: u32) -> Option<&TargetPoint> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub(crate) fn targets_mut(&mut self) -> &mut [TargetPoint] {
        &mut self.targets
    }

    pub fn validated_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_validated()).count()
    }

    pub fn unvalidated_count(&self) -> usize {
        self.targets.len() - self.validated_count()
    }

    /// Non-empty and every target validated
    pub fn is_complete(&self) -> bool {
        !self.targets.is_empty() && self.targets.iter().all(|t| t.is_validated())
    }

    /// Release every target, returning their ids in order
    pub fn clear(&mut self) -> Vec<u32> {
        self.key.clear();
        self.targets.drain(..).map(|t| t.id).collect()
    }
}
