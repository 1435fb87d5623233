//! GPU-ready packing of a refined sphere.
//!
//! The refiner works in `f64`; vertex buffers want tightly packed `f32`
//! triples. This module converts positions, exposes the raw byte views that a
//! renderer copies into its buffers, and checks the result against the
//! fixed capacity those buffers were created with.
//!
//! # Memory Layout
//!
//! - [`GpuPosition`]: 12 bytes (`float32x3`, no padding)
//! - indices: 4 bytes each (`uint32`)

// Positions are unit length; f32 keeps ~7 significant digits
#![allow(clippy::cast_possible_truncation)]

use bytemuck::{Pod, Zeroable};

use crate::error::{RefineError, RefineResult};
use crate::params::{RefineParams, MAX_SUPPORTED_LEVEL};
use crate::refiner::GeodesicRefiner;

/// A single vertex position as laid out in a vertex buffer.
///
/// # Example
///
/// ```
/// use mesh_geosphere::gpu::GpuPosition;
///
/// let p = GpuPosition::new([0.0, 0.0, 1.0]);
/// assert_eq!(std::mem::size_of::<GpuPosition>(), 12);
/// assert_eq!(bytemuck::bytes_of(&p).len(), 12);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPosition {
    /// Position (xyz).
    pub xyz: [f32; 3],
}

impl GpuPosition {
    /// Byte stride between consecutive positions.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Create a position from components.
    #[must_use]
    pub const fn new(xyz: [f32; 3]) -> Self {
        Self { xyz }
    }
}

/// Position and index data ready for upload.
#[derive(Debug, Clone, Default)]
pub struct GpuBuffers {
    /// All allocated positions, stale ones included so indices stay valid.
    pub positions: Vec<GpuPosition>,
    /// Flattened triangle indices.
    pub indices: Vec<u32>,
}

impl GpuBuffers {
    /// Pack the current state of a refiner.
    #[must_use]
    pub fn from_refiner(refiner: &GeodesicRefiner) -> Self {
        let positions = refiner
            .positions()
            .iter()
            .map(|p| GpuPosition::new([p.x as f32, p.y as f32, p.z as f32]))
            .collect();

        Self {
            positions,
            indices: refiner.indices().to_vec(),
        }
    }

    /// Per-vertex normals. On the unit sphere a normal is its position.
    #[must_use]
    pub fn normals(&self) -> &[GpuPosition] {
        &self.positions
    }

    /// Position buffer contents.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Index buffer contents.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of indices to draw.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        u32::try_from(self.indices.len()).unwrap_or(u32::MAX)
    }
}

/// Slot capacity of a pair of fixed-size position/index buffers.
///
/// Buffers are allocated once for the highest level the viewer will reach,
/// with `4^(max_level + 1)` vec3-sized slots each: that many positions, and
/// that many triangles (three indices per slot) in the index buffer.
/// Per-face subdivision lands exactly on the position limit at `max_level`,
/// so positions leaked by regroup coarsening can overflow it.
///
/// # Example
///
/// ```
/// use mesh_geosphere::gpu::{BufferCapacity, GpuPosition};
///
/// let capacity = BufferCapacity::for_max_level(8)?;
/// assert_eq!(capacity.slots, 262_144);
/// assert_eq!(capacity.position_buffer_size(), 262_144 * GpuPosition::STRIDE as u64);
/// # Ok::<(), mesh_geosphere::RefineError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity {
    /// Vec3-sized slots per buffer.
    pub slots: usize,
}

impl BufferCapacity {
    /// Capacity sized for every level up to `max_level`.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::LevelOutOfRange`] if `max_level` is above
    /// [`MAX_SUPPORTED_LEVEL`].
    pub fn for_max_level(max_level: u32) -> RefineResult<Self> {
        if max_level > MAX_SUPPORTED_LEVEL {
            return Err(RefineError::LevelOutOfRange {
                target: max_level,
                max: MAX_SUPPORTED_LEVEL,
            });
        }
        Ok(Self {
            slots: 1usize << (2 * (max_level + 1)),
        })
    }

    /// Capacity matching a refiner's parameters.
    ///
    /// # Errors
    ///
    /// See [`BufferCapacity::for_max_level`].
    pub fn for_params(params: &RefineParams) -> RefineResult<Self> {
        Self::for_max_level(params.max_level)
    }

    /// Size in bytes of the position buffer.
    #[must_use]
    pub const fn position_buffer_size(&self) -> u64 {
        (self.slots as u64).saturating_mul(GpuPosition::STRIDE as u64)
    }

    /// Number of `u32` indices the index buffer holds.
    #[must_use]
    pub const fn index_slots(&self) -> usize {
        self.slots.saturating_mul(3)
    }

    /// Size in bytes of the index buffer.
    #[must_use]
    pub const fn index_buffer_size(&self) -> u64 {
        (self.index_slots() as u64).saturating_mul(std::mem::size_of::<u32>() as u64)
    }

    /// Check that packed data fits both buffers.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::CapacityExceeded`] naming the first buffer that
    /// would overflow.
    pub fn check(&self, buffers: &GpuBuffers) -> RefineResult<()> {
        if buffers.positions.len() > self.slots {
            return Err(RefineError::CapacityExceeded {
                buffer: "position",
                required: buffers.positions.len(),
                capacity: self.slots,
            });
        }
        if buffers.indices.len() > self.index_slots() {
            return Err(RefineError::CapacityExceeded {
                buffer: "index",
                required: buffers.indices.len(),
                capacity: self.index_slots(),
            });
        }
        Ok(())
    }
}
