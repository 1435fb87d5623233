//! Geodesic sphere refinement.
//!
//! This crate builds unit-sphere triangle meshes by repeated quadrisection of
//! a regular tetrahedron:
//!
//! - **Subdivide**: split every face into four, pushing edge midpoints onto
//!   the sphere
//! - **Coarsen**: go back one level, either by regrouping child faces (lossy,
//!   the default) or by restoring a snapshot (exact)
//! - **GPU packing**: `f32` positions and `u32` indices ready to copy into
//!   fixed-capacity vertex/index buffers
//!
//! The crate performs no rendering and depends on no graphics API. Consumers
//! read [`GeodesicRefiner::positions`] and [`GeodesicRefiner::indices`] (or a
//! [`gpu::GpuBuffers`]) after each change and upload them however they like.
//!
//! # Examples
//!
//! Refine and count:
//!
//! ```
//! use mesh_geosphere::GeodesicRefiner;
//!
//! let mut sphere = GeodesicRefiner::default();
//! sphere.subdivide()?;
//! sphere.subdivide()?;
//!
//! assert_eq!(sphere.face_count(), 64);
//! assert_eq!(sphere.indices().len(), 192);
//! # Ok::<(), mesh_geosphere::RefineError>(())
//! ```
//!
//! Driving the sphere from viewer input:
//!
//! ```
//! use mesh_geosphere::{gpu::GpuBuffers, RefineParams, SphereCommand, SphereState};
//!
//! let mut state = SphereState::new(RefineParams::new().with_max_level(3));
//! let mut uploaded = state.generation();
//!
//! for command in [SphereCommand::Subdivide, SphereCommand::Coarsen, SphereCommand::Coarsen] {
//!     state.update(command);
//!     if state.generation() != uploaded {
//!         let buffers = GpuBuffers::from_refiner(state.refiner());
//!         assert_eq!(buffers.index_bytes().len(), buffers.indices.len() * 4);
//!         uploaded = state.generation();
//!     }
//! }
//!
//! // The second coarsen was refused at level 0
//! assert_eq!(uploaded, 2);
//! ```

#![warn(missing_docs)]

mod command;
mod error;
pub mod gpu;
pub mod obj;
mod params;
mod refiner;
mod stats;

pub use command::{CommandOutcome, SphereCommand, SphereState};
pub use error::{RefineError, RefineResult};
pub use params::{
    CoarsenPolicy, MidpointPolicy, RefineParams, DEFAULT_MAX_LEVEL, MAX_SUPPORTED_LEVEL,
};
pub use refiner::{tetrahedron_positions, GeodesicRefiner, TETRAHEDRON_FACES};
pub use stats::{LevelChange, RefineStats};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
