//! Error types for sphere refinement.

use thiserror::Error;

/// Errors that can occur while refining or exporting a geodesic sphere.
///
/// Level violations are rejected before any state is touched, so a caller
/// that receives one of these still holds a consistent mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RefineError {
    /// `subdivide` was called at the configured maximum level.
    #[error("cannot subdivide past level {max} (currently at level {level})")]
    MaxLevelReached {
        /// Current level.
        level: u32,
        /// Configured maximum level.
        max: u32,
    },

    /// `coarsen` was called on the base tetrahedron.
    #[error("cannot coarsen below level 0")]
    AtBaseLevel,

    /// A requested target level lies outside `[0, max]`.
    #[error("target level {target} is out of range (max {max})")]
    LevelOutOfRange {
        /// Requested level.
        target: u32,
        /// Configured maximum level.
        max: u32,
    },

    /// Refined data would not fit a fixed-capacity GPU buffer.
    #[error("{buffer} buffer needs {required} slots but only {capacity} are available")]
    CapacityExceeded {
        /// Which buffer overflowed ("position" or "index").
        buffer: &'static str,
        /// Slots required by the current mesh.
        required: usize,
        /// Slots available.
        capacity: usize,
    },

    /// I/O error while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for refinement operations.
pub type RefineResult<T> = std::result::Result<T, RefineError>;
