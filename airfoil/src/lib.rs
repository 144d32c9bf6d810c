//! Regression harness for airfoil panel-method analyses
//!
//! The panel method itself is not part of this crate. It is reached
//! through [`AirfoilAnalysis`] (or the per-point [`PointSolver`]), and its
//! results are compared against XFOIL verification dumps read by
//! [`reference`].

pub use float::Float;

pub mod analysis;
pub mod error;
pub mod reference;
pub mod regression;

pub use analysis::{
    degrees_linspace, AirfoilAnalysis, AirfoilGeometry, AirfoilProperties, AnalysisMode,
    Conditions, PointProperties, PointSolver, Sweep,
};
pub use error::{AnalysisError, ReferenceError, RegressionError};
pub use reference::{read_xfoil_verification_files, XfoilData, XFOIL_ROWS};
pub use regression::{
    naca_3310_4deg, relative_error, Coefficient, Comparison, ExpectedErrors,
    ReferenceCoefficients, ValidationCase, ValidationReport,
};
