use crate::regression::{Coefficient, Comparison};
use crate::Float;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("airfoil geometry `{name}`: {reason}")]
    Geometry { name: String, reason: String },
    #[error("{what} has shape {found}, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: String,
        found: String,
    },
    #[error("single-condition analysis pairs {aoa} angles of attack with {re} Reynolds numbers")]
    ConditionCount { aoa: usize, re: usize },
    #[error("solver failed at alpha = {aoa_deg:.2} deg, Re = {re:e}: {reason}")]
    Solver {
        aoa_deg: Float,
        re: Float,
        reason: String,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ReferenceError {
    #[error("could not read reference data {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed reference data in {}, line {line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum RegressionError {
    #[error("{coefficient} index {index} is outside the computed results of shape {shape}")]
    OutOfRange {
        coefficient: Coefficient,
        index: String,
        shape: String,
    },
    #[error("{coefficient} reference value is zero, relative error is undefined")]
    ZeroReference { coefficient: Coefficient },
    #[error("{label}: {}", describe_failures(.failures))]
    Exceeded {
        label: String,
        failures: Vec<Comparison>,
    },
}

fn describe_failures(failures: &[Comparison]) -> String {
    failures
        .iter()
        .map(|c| {
            format!(
                "{} relative error {:.6} exceeds expected {:.6}",
                c.coefficient, c.relative_error, c.expected
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
