//! XFOIL verification dumps
//!
//! Two whitespace-separated text files, each with a single header line:
//! the boundary-layer dump (`s x y Ue/Vinf Dstar Theta Cf H H* P ...`) and
//! the pressure dump (`x Cp`). Only the first 120 characters of a line are
//! considered, columns past that are ignored.

use crate::error::ReferenceError;
use crate::Float;
use ndarray::Array1;
use std::path::Path;

/// Data rows read from each file
pub const XFOIL_ROWS: usize = 160;
/// Characters of each line that are considered
pub const LINE_WIDTH: usize = 120;

const HEADER_LINES: usize = 1;
const BOUNDARY_LAYER_COLUMNS: usize = 10;
const CP_COLUMN: usize = 1;

/// Boundary-layer and pressure distribution along the surface
#[derive(Clone, Debug, PartialEq)]
pub struct XfoilData {
    /// Arc length
    pub s: Array1<Float>,
    pub x: Array1<Float>,
    pub y: Array1<Float>,
    pub cp: Array1<Float>,
    /// Edge velocity over free stream velocity
    pub ue_vinf: Array1<Float>,
    /// Displacement thickness
    pub delta_star: Array1<Float>,
    /// Momentum thickness
    pub theta: Array1<Float>,
    /// Skin friction coefficient
    pub cf: Array1<Float>,
    /// Shape factor
    pub h: Array1<Float>,
    /// Kinetic energy shape factor
    pub h_star: Array1<Float>,
    pub p: Array1<Float>,
}

impl XfoilData {
    pub fn len(&self) -> usize {
        self.s.len()
    }
    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }
}

/// Read the boundary-layer and pressure dumps, [`XFOIL_ROWS`] rows each
pub fn read_xfoil_verification_files<P: AsRef<Path>, Q: AsRef<Path>>(
    boundary_layer_file: P,
    cp_file: Q,
) -> Result<XfoilData, ReferenceError> {
    read_xfoil_files_with_rows(boundary_layer_file, cp_file, XFOIL_ROWS)
}

pub fn read_xfoil_files_with_rows<P: AsRef<Path>, Q: AsRef<Path>>(
    boundary_layer_file: P,
    cp_file: Q,
    rows: usize,
) -> Result<XfoilData, ReferenceError> {
    let bl_path = boundary_layer_file.as_ref();
    let cp_path = cp_file.as_ref();
    let bl_text = read(bl_path)?;
    let cp_text = read(cp_path)?;

    let columns = parse_columns(&bl_text, bl_path, rows, BOUNDARY_LAYER_COLUMNS)?;
    let cp = parse_columns(&cp_text, cp_path, rows, CP_COLUMN + 1)?
        .swap_remove(CP_COLUMN);

    let mut columns = columns.into_iter();
    let mut next = || columns.next().unwrap_or_default();
    let data = XfoilData {
        s: next(),
        x: next(),
        y: next(),
        ue_vinf: next(),
        delta_star: next(),
        theta: next(),
        cf: next(),
        h: next(),
        h_star: next(),
        p: next(),
        cp,
    };
    log::debug!(
        "Read {} reference rows from {} and {}",
        data.len(),
        bl_path.display(),
        cp_path.display()
    );
    Ok(data)
}

fn read(path: &Path) -> Result<String, ReferenceError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_owned(),
        source,
    })
}

/// The considered part of a line, split into fields
fn fields(line: &str) -> impl Iterator<Item = &str> {
    let end = line
        .char_indices()
        .nth(LINE_WIDTH)
        .map_or(line.len(), |(i, _)| i);
    line[..end].split_whitespace()
}

/// The first `ncolumns` columns of `rows` data rows, column-major
pub fn parse_columns(
    text: &str,
    path: &Path,
    rows: usize,
    ncolumns: usize,
) -> Result<Vec<Array1<Float>>, ReferenceError> {
    let malformed = |line: usize, reason: String| ReferenceError::Malformed {
        path: path.to_owned(),
        line,
        reason,
    };

    let mut columns = vec![Array1::zeros(rows); ncolumns];
    let mut lines = text.lines().skip(HEADER_LINES);
    for row in 0..rows {
        let line_number = HEADER_LINES + row + 1;
        let line = lines.next().ok_or_else(|| {
            malformed(
                line_number,
                format!("expected {} data rows, found {}", rows, row),
            )
        })?;

        let mut values = fields(line);
        for (c, column) in columns.iter_mut().enumerate() {
            let value = values.next().ok_or_else(|| {
                malformed(
                    line_number,
                    format!("expected at least {} columns, found {}", ncolumns, c),
                )
            })?;
            column[row] = value.parse::<Float>().map_err(|e| {
                malformed(
                    line_number,
                    format!("column {}: `{}` is not a number ({})", c + 1, value, e),
                )
            })?;
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_skipped_and_columns_split() {
        let text = "#  x  Cp\n 0.5  -0.25\n\t1.0 0.75 extra\n";
        let columns = parse_columns(text, Path::new("cp.txt"), 2, 2).unwrap();
        assert_eq!(columns[0].to_vec(), [0.5, 1.0]);
        assert_eq!(columns[1].to_vec(), [-0.25, 0.75]);
    }

    #[test]
    fn lines_are_truncated() {
        let mut line = format!("{:>10}", "1.5");
        line.push_str(&" ".repeat(LINE_WIDTH - line.len() - 3));
        // A number straddling the cut keeps only its first three characters
        line.push_str("2.75");
        let text = format!("header\n{}\n", line);
        let columns = parse_columns(&text, Path::new("bl.txt"), 1, 2).unwrap();
        assert_eq!(columns[0][0], 1.5);
        assert_eq!(columns[1][0], 2.7);

        let mut line = format!("{:>10}", "1.5");
        line.push_str(&" ".repeat(LINE_WIDTH - line.len()));
        line.push_str("2.75");
        let text = format!("header\n{}\n", line);
        match parse_columns(&text, Path::new("bl.txt"), 1, 2) {
            Err(ReferenceError::Malformed { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("columns"));
            }
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn missing_rows_are_reported() {
        let text = "header\n1 2\n";
        match parse_columns(text, Path::new("cp.txt"), 3, 2) {
            Err(ReferenceError::Malformed { line, reason, path }) => {
                assert_eq!(line, 3);
                assert_eq!(path, Path::new("cp.txt"));
                assert!(reason.contains("found 1"));
            }
            other => panic!("expected missing row, got {:?}", other),
        }
    }

    #[test]
    fn bad_numbers_are_reported() {
        let text = "header\n1 2\n3 x4\n";
        let err = parse_columns(text, Path::new("cp.txt"), 2, 2).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("malformed reference data in cp.txt, line 3"));
        assert!(message.contains("`x4`"));
    }
}
