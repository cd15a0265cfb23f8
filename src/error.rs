//! Error types.
//!
//! - `ExtractError`: failures of a single derived-parameter computation.
//! - `ModelError`: invalid model construction (unknown family, missing parameter).
//! - `AppError`: binary-level error carrying a process exit code.

use thiserror::Error;

/// Failure while computing a derived parameter.
///
/// The assembler recovers from these per parameter; only an `EmptyGrid` on the
/// base `topt`/`rmax` search aborts a whole extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// The model was non-finite at every point of the requested grid.
    #[error("model produced no finite values on [{start}, {end}]")]
    EmptyGrid { start: f64, end: f64 },

    /// Too few points: on one side of `topt` for a local regression, or finite
    /// observed temperatures for the domain.
    #[error("insufficient data: need {needed} points, found {found}")]
    InsufficientData { needed: usize, found: usize },

    /// Grid bounds or step are unusable (non-finite, reversed, non-positive step).
    #[error("invalid sampling grid: {0}")]
    InvalidGrid(String),
}

/// Failure while constructing a fitted curve from a family name and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown model family '{0}'")]
    UnknownModel(String),

    #[error("model '{model}' requires a finite parameter '{name}'")]
    MissingParameter { model: &'static str, name: &'static str },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::new(4, format!("Parameter extraction failed: {err}"))
    }
}
