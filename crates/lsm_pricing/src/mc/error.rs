//! Error types for the LSM pricing engine.
//!
//! All errors surface to the caller synchronously; the degenerate-regression
//! fallback in [`fit_continuation`](super::fit_continuation) is a defined
//! numerical policy, never an error.

use thiserror::Error;

/// Configuration errors, raised at build time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside the valid range.
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Step count outside the valid range.
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),

    /// Batch count outside the valid range.
    #[error("Invalid batch count {0}: must be in range [1, 10_000]")]
    InvalidBatchCount(usize),

    /// Antithetic pairing requested with an odd path count.
    #[error("Antithetic pairing requires an even path count, got {0}")]
    OddAntitheticPaths(usize),

    /// A required builder parameter was not supplied.
    #[error("Missing required parameter '{name}'")]
    MissingParameter {
        /// Parameter name.
        name: &'static str,
    },
}

/// Runtime errors of the pricing engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LsmError {
    /// Path matrix dimensions disagree with the pricing parameters.
    ///
    /// Raised before any regression is attempted.
    #[error(
        "Path matrix shape mismatch: expected {expected_paths} paths x {expected_steps} steps, \
         got {actual_paths} x {actual_steps}"
    )]
    ShapeMismatch {
        /// Path count the configuration expects.
        expected_paths: usize,
        /// Step count the configuration expects.
        expected_steps: usize,
        /// Path count of the supplied matrix.
        actual_paths: usize,
        /// Step count of the supplied matrix.
        actual_steps: usize,
    },

    /// The path matrix has no paths or no time steps.
    #[error("Path matrix is empty")]
    EmptyPaths,

    /// Model parameters are not usable for simulation.
    #[error("Invalid model parameters: {message}")]
    InvalidModel {
        /// Description of the offending parameter.
        message: String,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
