use crate::error::WakeError;
use crate::Float;
use ndarray::Array4;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Cartesian coordinates of a single panel corner
pub type Vertex = [Float; 3];

/// Corners of a wake panel. The `A` corners sit at the start of the
/// panel's time step, the `B` corners at the end of it.
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Left, leading
    A1,
    /// Left, trailing
    A2,
    /// Right, leading
    B1,
    /// Right, trailing
    B2,
}

impl Corner {
    pub const ALL: [Self; 4] = [Self::A1, Self::A2, Self::B1, Self::B2];
}

#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Corners<T> {
    pub a1: T,
    pub a2: T,
    pub b1: T,
    pub b2: T,
}

impl<T> Corners<T> {
    pub fn from_fn(mut f: impl FnMut(Corner) -> T) -> Self {
        Corners {
            a1: f(Corner::A1),
            a2: f(Corner::A2),
            b1: f(Corner::B1),
            b2: f(Corner::B2),
        }
    }
    pub fn as_ref(&self) -> Corners<&T> {
        Corners {
            a1: &self.a1,
            a2: &self.a2,
            b1: &self.b1,
            b2: &self.b2,
        }
    }
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Corners<U> {
        Corners {
            a1: f(self.a1),
            a2: f(self.a2),
            b1: f(self.b1),
            b2: f(self.b2),
        }
    }
    pub fn get(&self, corner: Corner) -> &T {
        match corner {
            Corner::A1 => &self.a1,
            Corner::A2 => &self.a2,
            Corner::B1 => &self.b1,
            Corner::B2 => &self.b2,
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (Corner, &T)> {
        Corner::ALL.into_iter().map(move |corner| (corner, self.get(corner)))
    }
}

impl<T> std::ops::Index<Corner> for Corners<T> {
    type Output = T;
    fn index(&self, corner: Corner) -> &T {
        self.get(corner)
    }
}

/// Extents of the wake array, `[propeller, time_step, blade, radial_ring]`
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WakeShape {
    pub props: usize,
    pub time_steps: usize,
    pub blades: usize,
    pub rings: usize,
}

impl WakeShape {
    pub fn new(props: usize, time_steps: usize, blades: usize, rings: usize) -> Self {
        Self {
            props,
            time_steps,
            blades,
            rings,
        }
    }
    pub fn from_dim((props, time_steps, blades, rings): (usize, usize, usize, usize)) -> Self {
        Self::new(props, time_steps, blades, rings)
    }
    pub fn dim(&self) -> (usize, usize, usize, usize) {
        (self.props, self.time_steps, self.blades, self.rings)
    }

    /// Number of panels held by the whole array
    pub fn len(&self) -> usize {
        self.props * self.time_steps * self.blades * self.rings
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major offset into the flat panel buffer
    #[inline]
    pub fn offset(&self, prop: usize, time_step: usize, blade: usize, ring: usize) -> usize {
        debug_assert!(prop < self.props);
        debug_assert!(time_step < self.time_steps);
        debug_assert!(blade < self.blades);
        debug_assert!(ring < self.rings);
        ((prop * self.time_steps + time_step) * self.blades + blade) * self.rings + ring
    }

    pub fn checked_offset(
        &self,
        prop: usize,
        time_step: usize,
        blade: usize,
        ring: usize,
    ) -> Option<usize> {
        if prop < self.props
            && time_step < self.time_steps
            && blade < self.blades
            && ring < self.rings
        {
            Some(self.offset(prop, time_step, blade, ring))
        } else {
            None
        }
    }

    /// Lattice vertices of one propeller: every blade carries
    /// `(rings + 1) x (time_steps + 1)` nodes
    pub fn n_vertices(&self) -> usize {
        self.blades * (self.rings + 1) * (self.time_steps + 1)
    }
    /// Quad cells of one propeller
    pub fn n_cells(&self) -> usize {
        self.blades * self.rings * self.time_steps
    }
}

impl std::fmt::Display for WakeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} props x {} time steps x {} blades x {} rings",
            self.props, self.time_steps, self.blades, self.rings
        )
    }
}

/// Corner positions of every wake panel, one flat buffer per corner.
#[derive(Clone, Debug, PartialEq)]
pub struct WakeGeometry {
    shape: WakeShape,
    corners: Corners<Vec<Vertex>>,
}

impl WakeGeometry {
    pub fn new(shape: WakeShape, corners: Corners<Vec<Vertex>>) -> Result<Self, WakeError> {
        for (corner, buffer) in corners.iter() {
            if buffer.len() != shape.len() {
                return Err(WakeError::ShapeMismatch {
                    what: format!("corner {:?} buffer", corner),
                    expected: format!("{} vertices ({})", shape.len(), shape),
                    found: format!("{} vertices", buffer.len()),
                });
            }
        }
        Ok(Self { shape, corners })
    }

    /// Collect the per-axis corner arrays as produced by the solver
    /// (`XA1`, `YA1`, ..., `ZB2`) into flat vertex buffers.
    pub fn from_arrays(
        x: Corners<Array4<Float>>,
        y: Corners<Array4<Float>>,
        z: Corners<Array4<Float>>,
    ) -> Result<Self, WakeError> {
        let dim = x.a1.dim();
        for (axis, arrays) in [("x", &x), ("y", &y), ("z", &z)] {
            for (corner, array) in arrays.iter() {
                if array.dim() != dim {
                    return Err(WakeError::ShapeMismatch {
                        what: format!("{}-coordinate of corner {:?}", axis, corner),
                        expected: format!("{:?}", dim),
                        found: format!("{:?}", array.dim()),
                    });
                }
            }
        }
        let shape = WakeShape::from_dim(dim);

        // `iter` walks in logical (row-major) order for any memory layout,
        // which is the order of `WakeShape::offset`
        let corners = Corners::from_fn(|corner| {
            x[corner]
                .iter()
                .zip(y[corner].iter())
                .zip(z[corner].iter())
                .map(|((&x, &y), &z)| [x, y, z])
                .collect::<Vec<Vertex>>()
        });

        Self::new(shape, corners)
    }

    pub fn shape(&self) -> WakeShape {
        self.shape
    }
    pub fn corners(&self) -> Corners<&[Vertex]> {
        self.corners.as_ref().map(|v| v.as_slice())
    }

    pub fn vertex(
        &self,
        corner: Corner,
        prop: usize,
        time_step: usize,
        blade: usize,
        ring: usize,
    ) -> Option<Vertex> {
        let offset = self.shape.checked_offset(prop, time_step, blade, ring)?;
        self.corners[corner].get(offset).copied()
    }
}

/// Panel corner that provides a given lattice vertex
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexSource {
    pub corner: Corner,
    pub time_step: usize,
    pub ring: usize,
}

/// Select which panel corner provides the lattice vertex at
/// (`time_step`, `ring`), with `time_step` in `0..=time_steps` and
/// `ring` in `0..=rings`.
///
/// The first time step is taken from the trailing corners of the first
/// panel row, later steps from the leading corners of the step before.
/// The outermost ring has no panel of its own and borrows the right-hand
/// corner of the ring inside it.
pub fn vertex_source(time_step: usize, ring: usize, rings: usize) -> VertexSource {
    debug_assert!(rings > 0);
    let last_ring = ring == rings;
    let first_step = time_step == 0;

    if last_ring && first_step {
        VertexSource {
            corner: Corner::B2,
            time_step,
            ring: ring - 1,
        }
    } else if first_step {
        VertexSource {
            corner: Corner::A2,
            time_step,
            ring,
        }
    } else if last_ring {
        VertexSource {
            corner: Corner::B1,
            time_step: time_step - 1,
            ring: ring - 1,
        }
    } else {
        VertexSource {
            corner: Corner::A1,
            time_step: time_step - 1,
            ring,
        }
    }
}
