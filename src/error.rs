//! Error types for the simulation core

/// Result alias carrying [`SmokeError`].
pub type Result<T> = std::result::Result<T, SmokeError>;

/// Errors surfaced by the core.
///
/// Ignored requests (duplicate emit start, reset while one is pending) and an
/// empty reserve are not errors; they are reported through return values.
#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    /// No pattern to play. Fatal for the lifecycle.
    #[error("pattern library is empty")]
    EmptyLibrary,
    /// A pattern with no positions could never be completed.
    #[error("pattern `{key}` has no positions")]
    EmptyPattern { key: String },
    /// A tunable failed validation while loading.
    #[error("invalid stat `{name}`: {value}")]
    InvalidStat { name: &'static str, value: f32 },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl SmokeError {
    /// True for errors that must be fixed in configuration before play.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SmokeError::EmptyLibrary | SmokeError::EmptyPattern { .. } | SmokeError::InvalidStat { .. }
        )
    }
}
