//! Geodesic sphere refinement.

// Vertex indices are u32 and checked against `MAX_VERTICES` before narrowing
#![allow(clippy::cast_possible_truncation)]

use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use tracing::debug;

use crate::error::{RefineError, RefineResult};
use crate::params::{CoarsenPolicy, MidpointPolicy, RefineParams};
use crate::stats::{LevelChange, RefineStats};

/// Faces of the seed tetrahedron, counter-clockwise seen from outside.
pub const TETRAHEDRON_FACES: [[u32; 3]; 4] = [[0, 1, 2], [0, 3, 1], [1, 3, 2], [0, 2, 3]];

/// Largest position count addressable by `u32` face indices.
const MAX_VERTICES: usize = u32::MAX as usize;

/// Corners of a regular tetrahedron inscribed in the unit sphere.
///
/// One vertex sits on the +Z pole; the other three share `z = -1/3`.
#[must_use]
pub fn tetrahedron_positions() -> [Point3<f64>; 4] {
    let sqrt2 = std::f64::consts::SQRT_2;
    let sqrt6 = 6.0_f64.sqrt();
    [
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 2.0 * sqrt2 / 3.0, -1.0 / 3.0),
        Point3::new(-sqrt6 / 3.0, -sqrt2 / 3.0, -1.0 / 3.0),
        Point3::new(sqrt6 / 3.0, -sqrt2 / 3.0, -1.0 / 3.0),
    ]
}

/// Faces and position count captured before a subdivision.
#[derive(Debug, Clone)]
struct Snapshot {
    faces: Vec<[u32; 3]>,
    vertex_count: usize,
}

/// A unit-sphere triangle mesh refined one level at a time.
///
/// The refiner starts from a regular tetrahedron (4 positions, 4 faces) at
/// level 0. [`subdivide`](Self::subdivide) splits every face into four by
/// pushing its edge midpoints out onto the sphere, and
/// [`coarsen`](Self::coarsen) goes back one level.
///
/// # Child emission order
///
/// A parent face `(i0, i1, i2)` with sphere midpoints `c01`, `c12`, `c20`
/// becomes, in this order:
///
/// ```text
/// (i0, c01, c20)  (c20, c01, c12)  (c12, c01, i1)  (c20, c12, i2)
/// ```
///
/// All four keep the parent's winding, and the parent corners sit at flat
/// index offsets 0, 8 and 11 of each group of twelve. The default coarsening
/// relies on exactly this layout.
///
/// # Growth and leaks
///
/// With the default [`MidpointPolicy::PerFace`] each subdivision appends three
/// positions per face, so an edge midpoint shared by two faces is stored
/// twice. With the default [`CoarsenPolicy::Regroup`] coarsening only rebuilds
/// the faces: positions created by the finer level stay allocated and
/// unreferenced, and the next subdivision appends after them. Alternating
/// subdivide/coarsen therefore grows `positions` without bound. Use
/// [`RefineParams::exact`] to deduplicate midpoints and make coarsening an
/// exact inverse.
///
/// # Example
///
/// ```
/// use mesh_geosphere::GeodesicRefiner;
///
/// let mut sphere = GeodesicRefiner::default();
/// assert_eq!(sphere.indices(), &[0, 1, 2, 0, 3, 1, 1, 3, 2, 0, 2, 3]);
///
/// sphere.subdivide()?;
/// assert_eq!(sphere.vertex_count(), 16);
/// assert_eq!(sphere.indices().len(), 48);
///
/// sphere.coarsen()?;
/// assert_eq!(sphere.face_count(), 4);
/// assert_eq!(sphere.vertex_count(), 16); // not released
/// # Ok::<(), mesh_geosphere::RefineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeodesicRefiner {
    positions: Vec<Point3<f64>>,
    faces: Vec<[u32; 3]>,
    level: u32,
    params: RefineParams,
    history: Vec<Snapshot>,
}

impl Default for GeodesicRefiner {
    fn default() -> Self {
        Self::new(RefineParams::default())
    }
}

impl GeodesicRefiner {
    /// Create a refiner at level 0 (the seed tetrahedron).
    #[must_use]
    pub fn new(params: RefineParams) -> Self {
        Self {
            positions: tetrahedron_positions().to_vec(),
            faces: TETRAHEDRON_FACES.to_vec(),
            level: 0,
            params,
            history: Vec::new(),
        }
    }

    /// Create a refiner and subdivide it up to `level` straight away.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::LevelOutOfRange`] if `level` exceeds
    /// `params.max_level`.
    pub fn with_initial_level(params: RefineParams, level: u32) -> RefineResult<Self> {
        let mut refiner = Self::new(params);
        refiner.set_level(level)?;
        Ok(refiner)
    }

    /// Current subdivision level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Configured maximum level.
    #[must_use]
    pub const fn max_level(&self) -> u32 {
        self.params.max_level
    }

    /// Parameters this refiner was built with.
    #[must_use]
    pub const fn params(&self) -> &RefineParams {
        &self.params
    }

    /// All allocated positions, including stale ones left by coarsening.
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Current faces as vertex index triples.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Current faces flattened to an index sequence.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.faces)
    }

    /// Number of allocated positions.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces at the current level.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct positions the current faces reference.
    #[must_use]
    pub fn referenced_vertex_count(&self) -> usize {
        self.faces
            .iter()
            .flatten()
            .copied()
            .collect::<HashSet<u32>>()
            .len()
    }

    /// Positions that are allocated but not referenced by any current face.
    #[must_use]
    pub fn stale_vertex_count(&self) -> usize {
        self.positions.len() - self.referenced_vertex_count()
    }

    /// Resolved corner positions of a face, or `None` if out of bounds.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<[Point3<f64>; 3]> {
        let face = self.faces.get(face_index)?;
        Some([
            *self.positions.get(face[0] as usize)?,
            *self.positions.get(face[1] as usize)?,
            *self.positions.get(face[2] as usize)?,
        ])
    }

    /// Summary of the current state.
    #[must_use]
    pub fn stats(&self) -> RefineStats {
        RefineStats {
            level: self.level,
            max_level: self.params.max_level,
            faces: self.faces.len(),
            vertices: self.positions.len(),
            referenced_vertices: self.referenced_vertex_count(),
            midpoints: self.params.midpoints,
            coarsen: self.params.coarsen,
        }
    }

    /// Split every face into four.
    ///
    /// The face count quadruples. Under [`MidpointPolicy::PerFace`] exactly
    /// `3 * face_count` positions are appended; under
    /// [`MidpointPolicy::Shared`] one position per distinct edge.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::MaxLevelReached`] at the maximum level and
    /// [`RefineError::CapacityExceeded`] if the new positions would not be
    /// addressable with `u32` indices. Nothing is modified on error.
    pub fn subdivide(&mut self) -> RefineResult<LevelChange> {
        if self.level >= self.params.max_level {
            return Err(RefineError::MaxLevelReached {
                level: self.level,
                max: self.params.max_level,
            });
        }

        let faces_before = self.faces.len();
        let vertices_before = self.positions.len();

        // Per-face growth is the upper bound for both policies
        let projected = vertices_before + 3 * faces_before;
        if projected > MAX_VERTICES {
            return Err(RefineError::CapacityExceeded {
                buffer: "position",
                required: projected,
                capacity: MAX_VERTICES,
            });
        }

        let parents = std::mem::take(&mut self.faces);
        self.faces = match self.params.midpoints {
            MidpointPolicy::PerFace => split_per_face(&mut self.positions, &parents),
            MidpointPolicy::Shared => split_shared(&mut self.positions, &parents),
        };

        if self.params.coarsen == CoarsenPolicy::Restore {
            self.history.push(Snapshot {
                faces: parents,
                vertex_count: vertices_before,
            });
        }

        let change = self.record(self.level + 1, faces_before, vertices_before);
        debug!("Subdivided sphere: {}", change);
        Ok(change)
    }

    /// Go back one level.
    ///
    /// Under [`CoarsenPolicy::Regroup`] every group of four child faces is
    /// replaced by its parent, read from the corners at flat offsets 0, 8 and
    /// 11. This is only a faithful inverse of the subdivision that produced
    /// the current faces; positions are never released. Under
    /// [`CoarsenPolicy::Restore`] the faces and position count from before
    /// the matching subdivision are restored exactly.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::AtBaseLevel`] at level 0. Nothing is modified
    /// on error.
    pub fn coarsen(&mut self) -> RefineResult<LevelChange> {
        if self.level == 0 {
            return Err(RefineError::AtBaseLevel);
        }

        let faces_before = self.faces.len();
        let vertices_before = self.positions.len();

        match self.history.pop() {
            Some(snapshot) => {
                self.positions.truncate(snapshot.vertex_count);
                self.faces = snapshot.faces;
            }
            None => self.faces = regroup_parents(&self.faces),
        }

        let change = self.record(self.level - 1, faces_before, vertices_before);
        debug!("Coarsened sphere: {}", change);
        Ok(change)
    }

    /// Subdivide or coarsen until `target` is reached.
    ///
    /// Returns one [`LevelChange`] per step taken (empty if already there).
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::LevelOutOfRange`] if `target` exceeds the
    /// maximum level and [`RefineError::CapacityExceeded`] if climbing to it
    /// would outgrow `u32` indices. Both are checked before the first step,
    /// so the refiner is left untouched on error.
    pub fn set_level(&mut self, target: u32) -> RefineResult<Vec<LevelChange>> {
        if target > self.params.max_level {
            return Err(RefineError::LevelOutOfRange {
                target,
                max: self.params.max_level,
            });
        }
        if target > self.level {
            match self.projected_vertices(target) {
                Some(required) if required <= MAX_VERTICES => {}
                required => {
                    return Err(RefineError::CapacityExceeded {
                        buffer: "position",
                        required: required.unwrap_or(usize::MAX),
                        capacity: MAX_VERTICES,
                    })
                }
            }
        }

        let mut changes = Vec::with_capacity(self.level.abs_diff(target) as usize);
        while self.level < target {
            changes.push(self.subdivide()?);
        }
        while self.level > target {
            changes.push(self.coarsen()?);
        }
        Ok(changes)
    }

    /// Position count after subdividing up to `target`, using per-face growth
    /// as the bound. `None` on `usize` overflow.
    fn projected_vertices(&self, target: u32) -> Option<usize> {
        let mut vertices = self.positions.len();
        let mut faces = self.faces.len();
        for _ in self.level..target {
            vertices = vertices.checked_add(faces.checked_mul(3)?)?;
            faces = faces.checked_mul(4)?;
        }
        Some(vertices)
    }

    /// Drop all refinement and return to the seed tetrahedron.
    ///
    /// Unlike coarsening, this releases every position.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.positions.extend_from_slice(&tetrahedron_positions());
        self.faces.clear();
        self.faces.extend_from_slice(&TETRAHEDRON_FACES);
        self.history.clear();
        self.level = 0;
        debug!("Reset sphere to base tetrahedron");
    }

    fn record(&mut self, to: u32, faces_before: usize, vertices_before: usize) -> LevelChange {
        let from = self.level;
        self.level = to;
        LevelChange {
            from,
            to,
            faces_before,
            faces_after: self.faces.len(),
            vertices_before,
            vertices_after: self.positions.len(),
        }
    }
}

/// Split each face into four, appending three midpoints per face.
fn split_per_face(positions: &mut Vec<Point3<f64>>, parents: &[[u32; 3]]) -> Vec<[u32; 3]> {
    positions.reserve(parents.len() * 3);
    let mut children = Vec::with_capacity(parents.len() * 4);

    for &[i0, i1, i2] in parents {
        let c01 = push_midpoint(positions, i0, i1);
        let c12 = push_midpoint(positions, i1, i2);
        let c20 = push_midpoint(positions, i2, i0);
        emit_children(&mut children, [i0, i1, i2], [c01, c12, c20]);
    }

    children
}

/// Split each face into four, reusing the midpoint of an edge already split.
fn split_shared(positions: &mut Vec<Point3<f64>>, parents: &[[u32; 3]]) -> Vec<[u32; 3]> {
    // A closed mesh has 3F/2 edges
    let mut edge_midpoints: HashMap<(u32, u32), u32> =
        HashMap::with_capacity(parents.len() * 3 / 2);
    let mut children = Vec::with_capacity(parents.len() * 4);

    for &[i0, i1, i2] in parents {
        let c01 = get_or_create_midpoint(positions, &mut edge_midpoints, i0, i1);
        let c12 = get_or_create_midpoint(positions, &mut edge_midpoints, i1, i2);
        let c20 = get_or_create_midpoint(positions, &mut edge_midpoints, i2, i0);
        emit_children(&mut children, [i0, i1, i2], [c01, c12, c20]);
    }

    children
}

fn emit_children(children: &mut Vec<[u32; 3]>, [i0, i1, i2]: [u32; 3], [c01, c12, c20]: [u32; 3]) {
    children.push([i0, c01, c20]);
    children.push([c20, c01, c12]);
    children.push([c12, c01, i1]);
    children.push([c20, c12, i2]);
}

fn get_or_create_midpoint(
    positions: &mut Vec<Point3<f64>>,
    edge_midpoints: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    *edge_midpoints
        .entry(normalize_edge(a, b))
        .or_insert_with(|| push_midpoint(positions, a, b))
}

fn push_midpoint(positions: &mut Vec<Point3<f64>>, a: u32, b: u32) -> u32 {
    let midpoint = sphere_midpoint(&positions[a as usize], &positions[b as usize]);
    let index = positions.len() as u32;
    positions.push(midpoint);
    index
}

/// Midpoint of the chord `ab` projected back onto the unit sphere.
fn sphere_midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::from((a.coords + b.coords).normalize())
}

/// Rebuild parent faces from groups of four children.
fn regroup_parents(children: &[[u32; 3]]) -> Vec<[u32; 3]> {
    children
        .chunks_exact(4)
        .map(|group| [group[0][0], group[2][2], group[3][2]])
        .collect()
}

/// Normalize edge so smaller vertex index comes first.
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn face_normal(refiner: &GeodesicRefiner, face: usize) -> nalgebra::Vector3<f64> {
        let [a, b, c] = refiner.triangle(face).expect("face in range");
        (b - a).cross(&(c - a))
    }

    #[test]
    fn test_tetrahedron_is_unit() {
        for p in tetrahedron_positions() {
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tetrahedron_is_regular() {
        let p = tetrahedron_positions();
        let edge = (p[0] - p[1]).norm();
        for [a, b, _] in TETRAHEDRON_FACES {
            assert_relative_eq!((p[a as usize] - p[b as usize]).norm(), edge, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_seed_faces_point_outward() {
        let refiner = GeodesicRefiner::default();
        for face in 0..refiner.face_count() {
            let [a, b, c] = refiner.triangle(face).unwrap();
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(face_normal(&refiner, face).dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_initial_state() {
        let refiner = GeodesicRefiner::default();
        assert_eq!(refiner.level(), 0);
        assert_eq!(refiner.vertex_count(), 4);
        assert_eq!(refiner.indices(), &[0, 1, 2, 0, 3, 1, 1, 3, 2, 0, 2, 3]);
        assert_eq!(refiner.stale_vertex_count(), 0);
    }

    #[test]
    fn test_child_emission_order() {
        let mut refiner = GeodesicRefiner::default();
        refiner.subdivide().unwrap();

        // First parent (0, 1, 2) appends c01 = 4, c12 = 5, c20 = 6
        assert_eq!(
            &refiner.faces()[..4],
            &[[0, 4, 6], [6, 4, 5], [5, 4, 1], [6, 5, 2]]
        );
        // Second parent (0, 3, 1) appends 7, 8, 9
        assert_eq!(
            &refiner.faces()[4..8],
            &[[0, 7, 9], [9, 7, 8], [8, 7, 3], [9, 8, 1]]
        );
    }

    #[test]
    fn test_split_preserves_winding() {
        // Counter-clockwise seen from +Z, on the unit sphere around the pole
        let mut positions = vec![
            Point3::from(nalgebra::Vector3::new(0.0, 0.0, 1.0).normalize()),
            Point3::from(nalgebra::Vector3::new(0.3, 0.0, 1.0).normalize()),
            Point3::from(nalgebra::Vector3::new(0.0, 0.3, 1.0).normalize()),
        ];
        let signed_z = |p: &[Point3<f64>], [a, b, c]: [u32; 3]| {
            let (a, b, c) = (p[a as usize], p[b as usize], p[c as usize]);
            (b - a).cross(&(c - a)).z
        };
        assert!(signed_z(&positions, [0, 1, 2]) > 0.0);

        let children = split_per_face(&mut positions, &[[0, 1, 2]]);
        assert_eq!(children.len(), 4);
        for child in children {
            assert!(signed_z(&positions, child) > 0.0, "{child:?} flipped");
        }
    }

    #[test]
    fn test_midpoints_on_sphere() {
        let refiner = GeodesicRefiner::default();
        let p = refiner.positions();
        let m = sphere_midpoint(&p[0], &p[1]);
        assert_relative_eq!(m.coords.norm(), 1.0, epsilon = 1e-12);
        // Equidistant from both ends of the edge
        assert_relative_eq!((m - p[0]).norm(), (m - p[1]).norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_per_face_duplicates_shared_edges() {
        let mut refiner = GeodesicRefiner::default();
        refiner.subdivide().unwrap();

        // Edge (0, 1) belongs to faces 0 and 1; both created its midpoint
        let p = refiner.positions();
        let from_face0 = p[4]; // c01 of (0, 1, 2)
        let from_face1 = p[9]; // c20 of (0, 3, 1), i.e. midpoint of (1, 0)
        assert_relative_eq!(from_face0, from_face1, epsilon = 1e-12);
    }

    #[test]
    fn test_shared_midpoints() {
        let mut refiner = GeodesicRefiner::new(RefineParams::new().with_midpoints(MidpointPolicy::Shared));
        refiner.subdivide().unwrap();
        assert_eq!(refiner.vertex_count(), 10); // 4 corners + 6 edges
        assert_eq!(refiner.face_count(), 16);
        refiner.subdivide().unwrap();
        assert_eq!(refiner.vertex_count(), 34);
        assert_eq!(refiner.stale_vertex_count(), 0);
    }

    #[test]
    fn test_subdivide_at_max_level() {
        let mut refiner = GeodesicRefiner::new(RefineParams::new().with_max_level(1));
        refiner.subdivide().unwrap();

        let before = refiner.clone();
        let result = refiner.subdivide();
        assert!(matches!(
            result,
            Err(RefineError::MaxLevelReached { level: 1, max: 1 })
        ));
        assert_eq!(refiner.level(), 1);
        assert_eq!(refiner.faces(), before.faces());
        assert_eq!(refiner.positions(), before.positions());
    }

    #[test]
    fn test_coarsen_at_base_level() {
        let mut refiner = GeodesicRefiner::default();
        assert!(matches!(refiner.coarsen(), Err(RefineError::AtBaseLevel)));
        assert_eq!(refiner.level(), 0);
        assert_eq!(refiner.vertex_count(), 4);
        assert_eq!(refiner.faces(), &TETRAHEDRON_FACES);
    }

    #[test]
    fn test_regroup_restores_parents_but_not_positions() {
        let mut refiner = GeodesicRefiner::default();
        refiner.subdivide().unwrap();
        let parents = refiner.faces().to_vec();
        let vertex_count = refiner.vertex_count();

        refiner.subdivide().unwrap();
        let change = refiner.coarsen().unwrap();

        assert_eq!(refiner.faces(), parents.as_slice());
        assert_eq!(refiner.level(), 1);
        assert_eq!(change.vertex_delta(), 0);
        assert!(refiner.vertex_count() > vertex_count);
        assert_eq!(refiner.stale_vertex_count(), refiner.vertex_count() - 16);
    }

    #[test]
    fn test_regroup_leaks_across_cycles() {
        let mut refiner = GeodesicRefiner::default();
        let mut last = refiner.vertex_count();
        for _ in 0..3 {
            refiner.subdivide().unwrap();
            refiner.coarsen().unwrap();
            assert!(refiner.vertex_count() > last);
            last = refiner.vertex_count();
        }
        // Four faces, still the tetrahedron
        assert_eq!(refiner.faces(), &TETRAHEDRON_FACES);
        assert_eq!(refiner.vertex_count(), 4 + 3 * 12);
    }

    #[test]
    fn test_restore_is_exact() {
        let mut refiner = GeodesicRefiner::new(RefineParams::exact());
        refiner.subdivide().unwrap();
        let faces = refiner.faces().to_vec();
        let positions = refiner.positions().to_vec();

        refiner.subdivide().unwrap();
        refiner.subdivide().unwrap();
        refiner.coarsen().unwrap();
        refiner.coarsen().unwrap();

        assert_eq!(refiner.faces(), faces.as_slice());
        assert_eq!(refiner.positions(), positions.as_slice());
    }

    #[test]
    fn test_restore_with_per_face_midpoints() {
        let params = RefineParams::new().with_coarsen(CoarsenPolicy::Restore);
        let mut refiner = GeodesicRefiner::new(params);
        refiner.subdivide().unwrap();
        let change = refiner.coarsen().unwrap();
        assert_eq!(change.vertex_delta(), -12);
        assert_eq!(refiner.vertex_count(), 4);
    }

    #[test]
    fn test_set_level() {
        let mut refiner = GeodesicRefiner::default();
        let changes = refiner.set_level(3).unwrap();
        assert_eq!(changes.len(), 3);
        assert_eq!(refiner.face_count(), 256);

        let changes = refiner.set_level(1).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| !c.is_refinement()));
        assert_eq!(refiner.face_count(), 16);

        assert!(refiner.set_level(1).unwrap().is_empty());
    }

    #[test]
    fn test_set_level_out_of_range() {
        let mut refiner = GeodesicRefiner::new(RefineParams::new().with_max_level(2));
        let result = refiner.set_level(3);
        assert!(matches!(
            result,
            Err(RefineError::LevelOutOfRange { target: 3, max: 2 })
        ));
        assert_eq!(refiner.level(), 0);
        assert_eq!(refiner.vertex_count(), 4);
    }

    #[test]
    fn test_set_level_past_index_range() {
        let mut refiner = GeodesicRefiner::new(RefineParams::new().with_max_level(u32::MAX));
        refiner.subdivide().unwrap();

        // 4^18 positions at level 17 cannot be addressed with u32
        let result = refiner.set_level(17);
        assert!(matches!(
            result,
            Err(RefineError::CapacityExceeded {
                buffer: "position",
                required: 68_719_476_736,
                ..
            })
        ));
        assert_eq!(refiner.level(), 1);
        assert_eq!(refiner.vertex_count(), 16);

        assert!(matches!(
            refiner.set_level(u32::MAX),
            Err(RefineError::CapacityExceeded {
                required: usize::MAX,
                ..
            })
        ));
        assert_eq!(refiner.level(), 1);
    }

    #[test]
    fn test_with_initial_level() {
        let refiner = GeodesicRefiner::with_initial_level(RefineParams::default(), 6).unwrap();
        assert_eq!(refiner.level(), 6);
        assert_eq!(Some(refiner.face_count()), RefineParams::expected_faces(6));
        assert_eq!(
            Some(refiner.vertex_count()),
            RefineParams::default().expected_vertices(6)
        );
    }

    #[test]
    fn test_reset() {
        let mut refiner = GeodesicRefiner::new(RefineParams::exact());
        refiner.set_level(2).unwrap();
        refiner.reset();
        assert_eq!(refiner.level(), 0);
        assert_eq!(refiner.vertex_count(), 4);
        assert_eq!(refiner.faces(), &TETRAHEDRON_FACES);
        assert!(matches!(refiner.coarsen(), Err(RefineError::AtBaseLevel)));
    }

    #[test]
    fn test_triangle_out_of_bounds() {
        let refiner = GeodesicRefiner::default();
        assert!(refiner.triangle(4).is_none());
        assert!(refiner.triangle(3).is_some());
    }

    #[test]
    fn test_normalize_edge() {
        assert_eq!(normalize_edge(0, 1), (0, 1));
        assert_eq!(normalize_edge(1, 0), (0, 1));
        assert_eq!(normalize_edge(5, 3), (3, 5));
    }

    #[test]
    fn test_regroup_parents() {
        let children = [[0, 4, 6], [6, 4, 5], [5, 4, 1], [6, 5, 2]];
        assert_eq!(regroup_parents(&children), vec![[0, 1, 2]]);
    }
}
