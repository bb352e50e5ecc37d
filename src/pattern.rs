//! Pattern library
//!
//! A read-only catalog of named point patterns. The simulation draws one
//! pattern uniformly at random per generation.

use std::path::Path;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmokeError};

/// A named sequence of target positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPattern {
    #[serde(default)]
    pub key: String,
    pub positions: Vec<Vec2>,
}

impl KeyPattern {
    pub fn new(key: impl Into<String>, positions: Vec<Vec2>) -> Self {
        Self {
            key: key.into(),
            positions,
        }
    }
}

/// Catalog of patterns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternLibrary {
    pub patterns: Vec<KeyPattern>,
}

impl PatternLibrary {
    pub fn new(patterns: Vec<KeyPattern>) -> Self {
        Self { patterns }
    }

    /// Parse from JSON. An empty library parses fine; it only fails when a
    /// pattern is picked. Patterns without positions are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let library: Self = serde_json::from_str(json)?;
        library.validate()?;
        Ok(library)
    }

    /// Reject patterns that have no positions
    pub fn validate(&self) -> Result<()> {
        match self.patterns.iter().find(|p| p.positions.is_empty()) {
            Some(pattern) => Err(SmokeError::EmptyPattern {
                key: pattern.key.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let library = Self::from_json(&json)?;
        log::info!(
            "Loaded {} patterns from {}",
            library.len(),
            path.as_ref().display()
        );
        Ok(library)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append an unnamed pattern (authoring)
    pub fn add_pattern(&mut self, positions: Vec<Vec2>) -> Result<()> {
        if positions.is_empty() {
            return Err(SmokeError::EmptyPattern { key: String::new() });
        }
        self.patterns.push(KeyPattern::new("", positions));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Draw one pattern uniformly at random
    pub fn pick_random_pattern<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&KeyPattern> {
        if self.patterns.is_empty() {
            return Err(SmokeError::EmptyLibrary);
        }
        let index = rng.random_range(0..self.patterns.len());
        Ok(&self.patterns[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_empty_library_is_configuration_error() {
        let library = PatternLibrary::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let err = library.pick_random_pattern(&mut rng).unwrap_err();
        assert!(matches!(err, SmokeError::EmptyLibrary));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_pick_covers_all_patterns() {
        let library = PatternLibrary::new(vec![
            KeyPattern::new("a", vec![Vec2::ZERO]),
            KeyPattern::new("b", vec![Vec2::ONE]),
            KeyPattern::new("c", vec![Vec2::X]),
        ]);
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let picked = library.pick_random_pattern(&mut rng).unwrap();
            let index = library.patterns.iter().position(|p| p == picked).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_json_round_trip_with_missing_key() {
        let library =
            PatternLibrary::from_json(r#"{ "patterns": [ { "positions": [[0.0, 0.0], [1.0, 2.0]] } ] }"#)
                .unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.patterns[0].key, "");
        assert_eq!(library.patterns[0].positions[1], Vec2::new(1.0, 2.0));

        let json = library.to_json().unwrap();
        assert_eq!(PatternLibrary::from_json(&json).unwrap(), library);
    }

    #[test]
    fn test_add_pattern() {
        let mut library = PatternLibrary::default();
        library.add_pattern(vec![Vec2::ZERO, Vec2::X]).unwrap();
        assert_eq!(library.len(), 1);
        assert!(library.patterns[0].key.is_empty());

        let err = library.add_pattern(Vec::new()).unwrap_err();
        assert!(matches!(err, SmokeError::EmptyPattern { .. }));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_empty_pattern() {
        let err = PatternLibrary::from_json(
            r#"{ "patterns": [ { "key": "dot", "positions": [[0.0, 0.0]] }, { "key": "empty", "positions": [] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SmokeError::EmptyPattern { ref key } if key == "empty"));
        assert!(err.is_configuration());
    }
}
