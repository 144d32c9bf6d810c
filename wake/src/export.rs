use crate::error::WakeError;
use crate::geometry::WakeGeometry;
use crate::mesh::WakeMesh;
use crate::results::WakeResults;
use crate::vtk::LegacyVtk;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Propeller Wake";

/// Write the wake of propeller `prop` as a legacy VTK file at `path`.
///
/// All inputs are validated and the mesh is assembled before the file is
/// created, so a rejected wake never leaves a partial file behind.
pub fn export_wake<P: AsRef<Path>>(
    path: P,
    geometry: &WakeGeometry,
    results: &WakeResults,
    prop: usize,
    title: Option<&str>,
) -> Result<(), WakeError> {
    let path = path.as_ref();
    let mesh = WakeMesh::build(geometry, prop, results)?;

    log::debug!("Writing wake of propeller {} to {}", prop, path.display());
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    LegacyVtk::new(title.unwrap_or(DEFAULT_TITLE), &mesh).write(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Same as [`export_wake`], into any writer
pub fn write_wake<W: Write>(
    writer: W,
    geometry: &WakeGeometry,
    results: &WakeResults,
    prop: usize,
    title: Option<&str>,
) -> Result<(), WakeError> {
    let mesh = WakeMesh::build(geometry, prop, results)?;
    LegacyVtk::new(title.unwrap_or(DEFAULT_TITLE), &mesh).write(writer)?;
    Ok(())
}

/// `wake.vtk` -> `wake_3.vtk`
pub fn propeller_path(template: &Path, prop: usize) -> PathBuf {
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wake".to_owned());
    let extension = template
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vtk".to_owned());
    template.with_file_name(format!("{}_{}.{}", stem, prop, extension))
}

/// Export propeller `prop` next to `template`, named by [`propeller_path`].
///
/// Exports of different propellers are independent and may run
/// concurrently.
pub fn export_propeller(
    template: &Path,
    geometry: &WakeGeometry,
    results: &WakeResults,
    prop: usize,
    title: Option<&str>,
) -> Result<PathBuf, WakeError> {
    let path = propeller_path(template, prop);
    export_wake(&path, geometry, results, prop, title)?;
    Ok(path)
}

#[test]
fn propeller_paths() {
    assert_eq!(
        propeller_path(Path::new("out/wake.vtk"), 2),
        PathBuf::from("out/wake_2.vtk")
    );
    assert_eq!(
        propeller_path(Path::new("prowim"), 0),
        PathBuf::from("prowim_0.vtk")
    );
}
