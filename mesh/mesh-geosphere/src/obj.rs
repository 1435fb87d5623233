//! Wavefront OBJ export.
//!
//! Every allocated position is written, stale ones included, so face indices
//! line up with [`GeodesicRefiner::positions`] one-to-one (OBJ indices are
//! 1-based). Normals equal positions on the unit sphere and share their index.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::RefineResult;
use crate::refiner::GeodesicRefiner;

/// Write the refiner's current mesh as OBJ text.
///
/// # Errors
///
/// Returns [`RefineError::Io`](crate::RefineError::Io) if writing fails.
///
/// # Example
///
/// ```
/// use mesh_geosphere::{obj::write_obj, GeodesicRefiner};
///
/// let sphere = GeodesicRefiner::default();
/// let mut out = Vec::new();
/// write_obj(&sphere, &mut out)?;
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("f 1//1 2//2 3//3"));
/// # Ok::<(), mesh_geosphere::RefineError>(())
/// ```
pub fn write_obj<W: Write>(refiner: &GeodesicRefiner, writer: &mut W) -> RefineResult<()> {
    writeln!(writer, "# geodesic sphere, level {}", refiner.level())?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        refiner.vertex_count(),
        refiner.face_count()
    )?;

    for p in refiner.positions() {
        writeln!(writer, "v {:.8} {:.8} {:.8}", p.x, p.y, p.z)?;
    }
    for p in refiner.positions() {
        writeln!(writer, "vn {:.8} {:.8} {:.8}", p.x, p.y, p.z)?;
    }
    for &[a, b, c] in refiner.faces() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}

/// Save the refiner's current mesh to an OBJ file.
///
/// # Errors
///
/// Returns [`RefineError::Io`](crate::RefineError::Io) if the file cannot be
/// created or written.
pub fn save_obj<P: AsRef<Path>>(refiner: &GeodesicRefiner, path: P) -> RefineResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(refiner, &mut writer)?;
    writer.flush()?;
    debug!("Wrote {} faces to {}", refiner.face_count(), path.display());
    Ok(())
}
