//! Legacy (`.vtk`) ASCII unstructured grid writer
//!
//! A file is a fixed sequence of sections, each one responsible for its
//! own keyword line and payload. Only what the wake mesh needs is
//! supported: 3D points, quad cells and scalar cell data.

use crate::geometry::Vertex;
use crate::mesh::{CellScalars, Quad, WakeMesh};
use std::io::{self, Write};

/// `VTK_QUAD` in the VTK cell type enumeration
pub const VTK_QUAD: u8 = 9;

/// Legacy readers stop at 256 bytes on the title line
const MAX_TITLE_LEN: usize = 255;

pub trait Section {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()>;
}

pub struct Header<'a> {
    pub title: &'a str,
}

impl Section for Header<'_> {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        let mut title = self.title.replace(&['\n', '\r'][..], " ");
        if title.len() > MAX_TITLE_LEN {
            let mut end = MAX_TITLE_LEN;
            while !title.is_char_boundary(end) {
                end -= 1;
            }
            title.truncate(end);
        }
        writeln!(w, "# vtk DataFile Version 4.0")?;
        writeln!(w, "{}", title)?;
        writeln!(w, "ASCII")?;
        writeln!(w, "DATASET UNSTRUCTURED_GRID")
    }
}

pub struct Points<'a>(pub &'a [Vertex]);

impl Section for Points<'_> {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "POINTS {} float", self.0.len())?;
        for [x, y, z] in self.0 {
            writeln!(w, "{} {} {}", x, y, z)?;
        }
        Ok(())
    }
}

pub struct Cells<'a>(pub &'a [Quad]);

impl Section for Cells<'_> {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        let n_cells = self.0.len();
        writeln!(w)?;
        // Every cell is prefixed by its vertex count
        writeln!(w, "CELLS {} {}", n_cells, n_cells * 5)?;
        for [i0, i1, i2, i3] in self.0 {
            writeln!(w, "4 {} {} {} {}", i0, i1, i2, i3)?;
        }
        Ok(())
    }
}

pub struct CellTypes {
    pub n_cells: usize,
}

impl Section for CellTypes {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "CELL_TYPES {}", self.n_cells)?;
        for _ in 0..self.n_cells {
            writeln!(w, "{}", VTK_QUAD)?;
        }
        Ok(())
    }
}

pub struct Scalars<'a>(pub &'a CellScalars);

impl Section for Scalars<'_> {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "SCALARS {} float 1", self.0.name)?;
        writeln!(w, "LOOKUP_TABLE default")?;
        for value in &self.0.values {
            writeln!(w, "{}", value)?;
        }
        Ok(())
    }
}

pub struct CellData<'a> {
    pub n_cells: usize,
    pub scalars: Vec<Scalars<'a>>,
}

impl Section for CellData<'_> {
    fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "CELL_DATA {}", self.n_cells)?;
        for scalars in &self.scalars {
            log::trace!("Writing cell scalars {}", scalars.0.name);
            scalars.write_to(w)?;
        }
        Ok(())
    }
}

/// A complete legacy file, sections in the order readers expect them
pub struct LegacyVtk<'a> {
    header: Header<'a>,
    points: Points<'a>,
    cells: Cells<'a>,
    cell_types: CellTypes,
    cell_data: CellData<'a>,
}

impl<'a> LegacyVtk<'a> {
    pub fn new(title: &'a str, mesh: &'a WakeMesh) -> Self {
        Self {
            header: Header { title },
            points: Points(&mesh.points),
            cells: Cells(&mesh.cells),
            cell_types: CellTypes {
                n_cells: mesh.n_cells(),
            },
            cell_data: CellData {
                n_cells: mesh.n_cells(),
                scalars: mesh.cell_data.iter().map(Scalars).collect(),
            },
        }
    }

    fn sections(&self) -> [&dyn Section; 5] {
        [
            &self.header,
            &self.points,
            &self.cells,
            &self.cell_types,
            &self.cell_data,
        ]
    }

    pub fn write<W: Write>(&self, mut w: W) -> io::Result<()> {
        for section in self.sections() {
            section.write_to(&mut w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> WakeMesh {
        WakeMesh {
            points: vec![
                [0.0, 0.0, 0.0],
                [1.2346, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, -0.5],
            ],
            cells: vec![[0, 1, 3, 2]],
            cell_data: vec![
                CellScalars {
                    name: "circulation".to_owned(),
                    values: vec![15.0],
                },
                CellScalars {
                    name: "vt".to_owned(),
                    values: vec![0.25],
                },
            ],
        }
    }

    #[test]
    fn writes_sections_in_order() {
        let mesh = unit_quad();
        let mut buffer = Vec::new();
        LegacyVtk::new("Propeller Wake", &mesh)
            .write(&mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let expected = "# vtk DataFile Version 4.0
Propeller Wake
ASCII
DATASET UNSTRUCTURED_GRID

POINTS 4 float
0 0 0
1.2346 0 0
0 1 0
1 1 -0.5

CELLS 1 5
4 0 1 3 2

CELL_TYPES 1
9

CELL_DATA 1
SCALARS circulation float 1
LOOKUP_TABLE default
15
SCALARS vt float 1
LOOKUP_TABLE default
0.25
";
        assert_eq!(text, expected);
    }

    #[test]
    fn title_is_kept_on_one_line() {
        let mut buffer = Vec::new();
        Header {
            title: "two\nlines",
        }
        .write_to(&mut buffer)
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("two lines"));
        assert_eq!(text.lines().count(), 4);

        let long = "x".repeat(400);
        let mut buffer = Vec::new();
        Header { title: &long }.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1).map(str::len), Some(MAX_TITLE_LEN));

        // Two bytes per character, cut back to a character boundary
        let wide = "æ".repeat(200);
        let mut buffer = Vec::new();
        Header { title: &wide }.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let title = text.lines().nth(1).unwrap();
        assert_eq!(title.len(), MAX_TITLE_LEN - 1);
        assert_eq!(title.chars().count(), 127);
    }
}
