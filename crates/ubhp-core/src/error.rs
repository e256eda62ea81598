//! Error taxonomy for the fingerprinting and composition pipeline.
//!
//! Every variant is recoverable by the caller: the pipeline returns typed
//! errors rather than panicking, and carries no retry logic of its own. The
//! zero-norm epsilon substitution inside the harmonic signature function is
//! a defined numeric policy, not an error.

use thiserror::Error;

use crate::compose::Stage;

/// Errors from ray aggregation and hierarchical composition.
#[derive(Debug, Error)]
pub enum HarmonyError {
    /// Vectors of unequal or wrong dimension were combined.
    ///
    /// Raised by the centroid aggregator and by composition primitives that
    /// validate their operands. Never silently truncates or pads.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension established by the first operand (or required by the
        /// operation)
        expected: usize,
        /// Dimension of the offending operand
        actual: usize,
    },

    /// An aggregate was requested over zero inputs.
    #[error("empty input: at least one vector is required")]
    EmptyInput,

    /// A derived vector was requested before its declared prerequisites
    /// were computed.
    #[error("missing prerequisite: {stage} must be computed first")]
    MissingPrerequisite {
        /// The stage that has not been computed yet
        stage: Stage,
    },

    /// Reading an external input source failed. The underlying I/O error is
    /// surfaced unchanged.
    #[error("source read failed: {0}")]
    SourceRead(#[from] std::io::Error),
}

/// Result alias for pipeline operations.
pub type HarmonyResult<T> = Result<T, HarmonyError>;
