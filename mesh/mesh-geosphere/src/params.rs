//! Refinement parameters.

use crate::error::RefineResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Level ceiling used by the interactive viewers; GPU buffers are sized for it.
pub const DEFAULT_MAX_LEVEL: u32 = 8;

/// Highest level whose fixed GPU buffers can be sized: `4^(level + 1)`
/// per-face positions still fit `u32` indices.
pub const MAX_SUPPORTED_LEVEL: u32 = 14;

/// How edge midpoints are created during subdivision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MidpointPolicy {
    /// Every face appends its own three midpoints.
    /// An edge shared by two faces yields two coincident positions.
    #[default]
    PerFace,

    /// Midpoints are cached per undirected edge and reused by the
    /// neighbouring face. Halves vertex growth and removes seams.
    Shared,
}

/// How `coarsen` goes back one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoarsenPolicy {
    /// Rebuild parent faces from the corners of each group of four children.
    /// Positions created by the finer level stay allocated.
    #[default]
    Regroup,

    /// Keep a snapshot per subdivision and restore it exactly,
    /// truncating the positions that level appended.
    Restore,
}

/// Parameters for a [`GeodesicRefiner`](crate::GeodesicRefiner).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefineParams {
    /// Highest level `subdivide` may reach.
    pub max_level: u32,

    /// Midpoint creation policy.
    pub midpoints: MidpointPolicy,

    /// Coarsening policy.
    pub coarsen: CoarsenPolicy,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            midpoints: MidpointPolicy::default(),
            coarsen: CoarsenPolicy::default(),
        }
    }
}

impl RefineParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters with deduplicated midpoints and exact coarsening.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            midpoints: MidpointPolicy::Shared,
            coarsen: CoarsenPolicy::Restore,
            ..Self::default()
        }
    }

    /// Set the maximum level.
    #[must_use]
    pub const fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the midpoint policy.
    #[must_use]
    pub const fn with_midpoints(mut self, midpoints: MidpointPolicy) -> Self {
        self.midpoints = midpoints;
        self
    }

    /// Set the coarsening policy.
    #[must_use]
    pub const fn with_coarsen(mut self, coarsen: CoarsenPolicy) -> Self {
        self.coarsen = coarsen;
        self
    }

    /// Face count of the sphere at `level`: `4 * 4^level`.
    ///
    /// `None` if the count does not fit a `usize`.
    #[must_use]
    pub const fn expected_faces(level: u32) -> Option<usize> {
        match level.checked_add(1) {
            Some(exp) => 4usize.checked_pow(exp),
            None => None,
        }
    }

    /// Vertex count after subdividing the tetrahedron straight up to `level`.
    ///
    /// Per-face midpoints append three positions per face and level, which
    /// sums to `4^(level + 1)`. Shared midpoints follow Euler's formula for a
    /// closed sphere, `2 + 2 * 4^level`. Cycles of coarsen/subdivide under
    /// [`CoarsenPolicy::Regroup`] leave more positions than this.
    ///
    /// `None` if the count does not fit a `usize`.
    #[must_use]
    pub const fn expected_vertices(&self, level: u32) -> Option<usize> {
        match (self.midpoints, Self::expected_faces(level)) {
            (MidpointPolicy::PerFace, faces) => faces,
            (MidpointPolicy::Shared, Some(faces)) => Some(2 + faces / 2),
            (MidpointPolicy::Shared, None) => None,
        }
    }

    /// Vec3-sized slots per GPU buffer for any level up to `max_level`:
    /// `4^(max_level + 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::LevelOutOfRange`](crate::RefineError::LevelOutOfRange)
    /// if `max_level` is above [`MAX_SUPPORTED_LEVEL`].
    pub fn buffer_capacity(&self) -> RefineResult<usize> {
        crate::gpu::BufferCapacity::for_params(self).map(|capacity| capacity.slots)
    }
}
