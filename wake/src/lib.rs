//! Export of propeller wake panels to legacy VTK unstructured grids
//!
//! The wake is handed over by the vortex-lattice solver as a structured
//! array of quadrilateral panel corners indexed by
//! `[propeller, time_step, blade, radial_ring]`. This crate turns one
//! propeller of that array into a point lattice and quad connectivity,
//! averages the per-ring results onto the cells, and writes the
//! `# vtk DataFile Version 4.0` ASCII dialect.

pub use float::Float;

pub mod error;
pub mod export;
pub mod geometry;
pub mod mesh;
pub mod results;
pub mod vtk;

pub use error::WakeError;
pub use export::{export_propeller, export_wake, propeller_path, write_wake, DEFAULT_TITLE};
pub use geometry::{vertex_source, Corner, Corners, Vertex, VertexSource, WakeGeometry, WakeShape};
pub use mesh::WakeMesh;
pub use results::{ScalarField, WakeResults};
