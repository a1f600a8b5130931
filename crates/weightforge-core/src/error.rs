//! Error types for WeightForge

use thiserror::Error;

/// Main error type for constraint application
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightForgeError {
    /// The configured norm axis does not exist on the weight array
    #[error("axis {axis} is out of bounds for array of dimension {ndim}")]
    AxisOutOfBounds {
        /// Axis as configured (may be negative)
        axis: isize,
        /// Rank of the array the constraint was applied to
        ndim: usize,
    },
}

/// Result type alias for WeightForge operations
pub type Result<T> = std::result::Result<T, WeightForgeError>;
