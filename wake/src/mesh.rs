use crate::error::WakeError;
use crate::geometry::{vertex_source, Vertex, WakeGeometry};
use crate::results::WakeResults;
use crate::Float;
use ndarray::ArrayView1;

/// Decimals kept for lattice coordinates
pub const COORDINATE_DECIMALS: i32 = 4;

/// Vertex indices of a quad, counter-clockwise seen from the blade
pub type Quad = [usize; 4];

/// Cell-centred values of one result field
#[derive(Clone, Debug, PartialEq)]
pub struct CellScalars {
    pub name: String,
    pub values: Vec<Float>,
}

/// Unstructured quad mesh of the wake shed by one propeller
#[derive(Clone, Debug, PartialEq)]
pub struct WakeMesh {
    pub points: Vec<Vertex>,
    pub cells: Vec<Quad>,
    pub cell_data: Vec<CellScalars>,
}

impl WakeMesh {
    /// Validate the inputs and assemble the mesh of propeller `prop`.
    pub fn build(
        geometry: &WakeGeometry,
        prop: usize,
        results: &WakeResults,
    ) -> Result<Self, WakeError> {
        validate(geometry, prop, results)?;
        let shape = geometry.shape();

        let points = lattice_points(geometry, prop)?;
        let cells = quad_connectivity(shape.blades, shape.time_steps, shape.rings);
        let cell_data = results
            .fields()
            .map(|field| CellScalars {
                name: field.name.to_owned(),
                values: cell_scalars(field.values, shape.blades, shape.time_steps, shape.rings),
            })
            .collect::<Vec<_>>();

        debug_assert_eq!(points.len(), shape.n_vertices());
        debug_assert_eq!(cells.len(), shape.n_cells());
        log::debug!(
            "Wake mesh of propeller {}: {} points, {} cells, {} fields",
            prop,
            points.len(),
            cells.len(),
            cell_data.len()
        );

        Ok(Self {
            points,
            cells,
            cell_data,
        })
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Everything that can be rejected before a single byte is written
pub fn validate(
    geometry: &WakeGeometry,
    prop: usize,
    results: &WakeResults,
) -> Result<(), WakeError> {
    let shape = geometry.shape();
    if shape.is_empty() {
        return Err(WakeError::EmptyWake(shape));
    }
    if prop >= shape.props {
        return Err(WakeError::PropellerOutOfRange {
            prop,
            props: shape.props,
        });
    }
    results.validate(shape.rings)
}

/// Lattice of panel corners, traversed blade -> time step -> ring.
///
/// The traversal order is the vertex numbering used by
/// [`quad_connectivity`].
pub fn lattice_points(geometry: &WakeGeometry, prop: usize) -> Result<Vec<Vertex>, WakeError> {
    let shape = geometry.shape();
    let mut points = Vec::with_capacity(shape.n_vertices());

    for blade in 0..shape.blades {
        for time_step in 0..=shape.time_steps {
            for ring in 0..=shape.rings {
                let source = vertex_source(time_step, ring, shape.rings);
                let vertex = geometry
                    .vertex(source.corner, prop, source.time_step, blade, source.ring)
                    .ok_or(WakeError::OutOfRange {
                        corner: source.corner,
                        prop,
                        time_step: source.time_step,
                        blade,
                        ring: source.ring,
                    })?;
                points.push(vertex.map(|c| float::round_to(c, COORDINATE_DECIMALS)));
            }
        }
    }
    Ok(points)
}

/// Quad cells over the lattice of [`lattice_points`].
///
/// Each blade owns a contiguous block of `(rings + 1) * (time_steps + 1)`
/// vertices, one row of `rings + 1` per time step.
pub fn quad_connectivity(blades: usize, time_steps: usize, rings: usize) -> Vec<Quad> {
    let n_vertices = blades * (rings + 1) * (time_steps + 1);
    let cells_per_blade = rings * time_steps;
    let mut cells = Vec::with_capacity(blades * cells_per_blade);

    for blade in 0..blades {
        let mut node = blade * n_vertices / blades;
        for i in 0..cells_per_blade {
            if i != 0 && i % rings == 0 {
                // New lattice row: step over the tip vertex of the previous one
                node += 1;
            }
            cells.push([node, node + 1, node + rings + 2, node + rings + 1]);
            node += 1;
        }
    }
    cells
}

/// Average the ring-boundary samples bracketing each cell, blade-major
pub fn cell_scalars(
    values: ArrayView1<Float>,
    blades: usize,
    time_steps: usize,
    rings: usize,
) -> Vec<Float> {
    let cells_per_blade = rings * time_steps;
    let mut cell_values = Vec::with_capacity(blades * cells_per_blade);
    for _blade in 0..blades {
        for i in 0..cells_per_blade {
            let ring = i % rings;
            cell_values.push(0.5 * (values[ring] + values[ring + 1]));
        }
    }
    cell_values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Corner, Corners, WakeShape};

    /// Panels laid out on a flat sheet: x grows with the ring, y with time,
    /// and each blade is offset in z.
    fn flat_sheet(shape: WakeShape) -> WakeGeometry {
        let corners = Corners::from_fn(|corner| {
            let mut buffer = vec![[0.0; 3]; shape.len()];
            for p in 0..shape.props {
                for t in 0..shape.time_steps {
                    for b in 0..shape.blades {
                        for r in 0..shape.rings {
                            let (dr, dt) = match corner {
                                Corner::A1 => (0, 1),
                                Corner::A2 => (0, 0),
                                Corner::B1 => (1, 1),
                                Corner::B2 => (1, 0),
                            };
                            buffer[shape.offset(p, t, b, r)] = [
                                (r + dr) as Float,
                                (t + dt) as Float,
                                (10 * b + 100 * p) as Float,
                            ];
                        }
                    }
                }
            }
            buffer
        });
        WakeGeometry::new(shape, corners).unwrap()
    }

    #[test]
    fn connectivity_matches_closed_form() {
        for &(blades, time_steps, rings) in &[(1, 1, 1), (2, 3, 4), (3, 5, 2), (1, 4, 7)] {
            let cells = quad_connectivity(blades, time_steps, rings);
            let n_vertices = blades * (rings + 1) * (time_steps + 1);
            assert_eq!(cells.len(), blades * rings * time_steps);

            let cells_per_blade = rings * time_steps;
            for (index, cell) in cells.iter().enumerate() {
                let blade = index / cells_per_blade;
                let i = index % cells_per_blade;
                let start =
                    blade * n_vertices / blades + (i / rings) * (rings + 1) + i % rings;
                assert_eq!(*cell, [start, start + 1, start + rings + 2, start + rings + 1]);

                assert!(cell.iter().all(|&n| n < n_vertices));
                let mut sorted = *cell;
                sorted.sort_unstable();
                assert!(sorted.windows(2).all(|w| w[0] != w[1]));
            }
        }
    }

    #[test]
    fn cells_cover_panels_on_flat_sheet() {
        let shape = WakeShape::new(1, 3, 2, 4);
        let geometry = flat_sheet(shape);
        let points = lattice_points(&geometry, 0).unwrap();
        assert_eq!(points.len(), shape.n_vertices());

        let cells = quad_connectivity(shape.blades, shape.time_steps, shape.rings);
        for cell in &cells {
            let [p0, p1, p2, p3] = cell.map(|n| points[n]);
            // Unit squares on a single blade sheet
            assert_eq!(p0[2], p2[2]);
            assert_eq!(p1[0] - p0[0], 1.0);
            assert_eq!(p2[1] - p1[1], 1.0);
            assert_eq!(p2[0] - p3[0], 1.0);
            assert_eq!(p3[1] - p0[1], 1.0);
        }
    }

    #[test]
    fn lattice_follows_corner_precedence() {
        let shape = WakeShape::new(2, 2, 1, 2);
        let geometry = flat_sheet(shape);
        let points = lattice_points(&geometry, 1).unwrap();
        let expected = [
            [0.0, 0.0, 100.0],
            [1.0, 0.0, 100.0],
            [2.0, 0.0, 100.0],
            [0.0, 1.0, 100.0],
            [1.0, 1.0, 100.0],
            [2.0, 1.0, 100.0],
            [0.0, 2.0, 100.0],
            [1.0, 2.0, 100.0],
            [2.0, 2.0, 100.0],
        ];
        assert_eq!(points, expected);
    }

    #[test]
    fn lattice_is_rounded() {
        let shape = WakeShape::new(1, 1, 1, 1);
        let corners = Corners::from_fn(|_| vec![[1.23456789, -0.00004, 2.00006]]);
        let geometry = WakeGeometry::new(shape, corners).unwrap();
        let points = lattice_points(&geometry, 0).unwrap();
        for point in points {
            approx::assert_abs_diff_eq!(point[0], 1.2346, epsilon = 1e-12);
            approx::assert_abs_diff_eq!(point[1], 0.0, epsilon = 1e-12);
            approx::assert_abs_diff_eq!(point[2], 2.0001, epsilon = 1e-12);
        }
    }

    #[test]
    fn huge_coordinates_stay_finite() {
        let huge = Float::MAX / 10.0;
        let shape = WakeShape::new(1, 1, 1, 1);
        let corners = Corners::from_fn(|_| vec![[huge, -huge, 0.5]]);
        let geometry = WakeGeometry::new(shape, corners).unwrap();
        for point in lattice_points(&geometry, 0).unwrap() {
            assert_eq!(point, [huge, -huge, 0.5]);
        }
    }

    #[test]
    fn scalars_are_averaged_between_rings() {
        let values = ndarray::arr1(&[10.0, 20.0, 30.0]);
        assert_eq!(cell_scalars(values.view(), 1, 1, 2), [15.0, 25.0]);
        assert_eq!(
            cell_scalars(values.view(), 2, 2, 2),
            [15.0, 25.0, 15.0, 25.0, 15.0, 25.0, 15.0, 25.0]
        );
    }

    #[test]
    fn build_validates_before_assembling() {
        let shape = WakeShape::new(1, 2, 2, 3);
        let geometry = flat_sheet(shape);
        let results = WakeResults::new(ndarray::Array1::zeros(4), ndarray::Array1::ones(4));

        let mesh = WakeMesh::build(&geometry, 0, &results).unwrap();
        assert_eq!(mesh.n_points(), shape.n_vertices());
        assert_eq!(mesh.n_cells(), shape.n_cells());
        assert_eq!(mesh.cell_data.len(), 2);
        assert!(mesh.cell_data.iter().all(|d| d.values.len() == shape.n_cells()));

        assert!(matches!(
            WakeMesh::build(&geometry, 1, &results),
            Err(WakeError::PropellerOutOfRange { prop: 1, props: 1 })
        ));

        let short = WakeResults::new(ndarray::Array1::zeros(3), ndarray::Array1::ones(4));
        assert!(matches!(
            WakeMesh::build(&geometry, 0, &short),
            Err(WakeError::FieldLength { .. })
        ));

        let empty = WakeGeometry::new(
            WakeShape::new(1, 0, 2, 3),
            Corners::from_fn(|_| Vec::new()),
        )
        .unwrap();
        assert!(matches!(
            WakeMesh::build(&empty, 0, &results),
            Err(WakeError::EmptyWake(_))
        ));
    }
}
