//! Summary types for refinement state and level changes.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::{CoarsenPolicy, MidpointPolicy};

/// Snapshot of a refiner's size at its current level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefineStats {
    /// Current subdivision level.
    pub level: u32,

    /// Configured maximum level.
    pub max_level: u32,

    /// Number of faces in the current index sequence.
    pub faces: usize,

    /// Number of allocated positions.
    pub vertices: usize,

    /// Number of distinct positions referenced by the current faces.
    pub referenced_vertices: usize,

    /// Midpoint policy in use.
    pub midpoints: MidpointPolicy,

    /// Coarsening policy in use.
    pub coarsen: CoarsenPolicy,
}

impl RefineStats {
    /// Positions still allocated but unreferenced by any current face.
    #[must_use]
    pub const fn stale_vertices(&self) -> usize {
        self.vertices.saturating_sub(self.referenced_vertices)
    }

    /// Length of the flattened index sequence.
    #[must_use]
    pub const fn index_count(&self) -> usize {
        self.faces * 3
    }
}

impl std::fmt::Display for RefineStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level {}/{}: {} faces, {} vertices ({} stale) [{:?}, {:?}]",
            self.level,
            self.max_level,
            self.faces,
            self.vertices,
            self.stale_vertices(),
            self.midpoints,
            self.coarsen
        )
    }
}

/// Outcome of a single successful `subdivide` or `coarsen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelChange {
    /// Level before the operation.
    pub from: u32,
    /// Level after the operation.
    pub to: u32,
    /// Face count before the operation.
    pub faces_before: usize,
    /// Face count after the operation.
    pub faces_after: usize,
    /// Position count before the operation.
    pub vertices_before: usize,
    /// Position count after the operation.
    pub vertices_after: usize,
}

impl LevelChange {
    /// Whether the operation refined the mesh.
    #[must_use]
    pub const fn is_refinement(&self) -> bool {
        self.to > self.from
    }

    /// Face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.faces_before == 0 {
            1.0
        } else {
            self.faces_after as f64 / self.faces_before as f64
        }
    }

    /// Positions appended (positive) or released (negative).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn vertex_delta(&self) -> isize {
        self.vertices_after as isize - self.vertices_before as isize
    }
}

impl std::fmt::Display for LevelChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level {} → {}: {} → {} faces ({:.2}x), {} → {} vertices",
            self.from,
            self.to,
            self.faces_before,
            self.faces_after,
            self.face_ratio(),
            self.vertices_before,
            self.vertices_after
        )
    }
}
