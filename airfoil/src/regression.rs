//! Comparison of computed coefficients against reference data
//!
//! A check passes when the relative error does not grow past the error
//! recorded for the case, `relative_error - expected < tolerance`. Getting
//! closer to the reference always passes.

use crate::analysis::AirfoilProperties;
use crate::error::RegressionError;
use crate::reference::XfoilData;
use crate::Float;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coefficient {
    Cl,
    Cd,
    Cm,
    Cp,
}

impl std::fmt::Display for Coefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cl => "CL",
            Self::Cd => "CD",
            Self::Cm => "CM",
            Self::Cp => "CP",
        })
    }
}

pub fn relative_error(computed: Float, reference: Float) -> Float {
    ((computed - reference) / reference).abs()
}

/// Integrated coefficients of the reference solution
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReferenceCoefficients {
    pub cl: Float,
    pub cd: Float,
    pub cm: Float,
}

/// Relative errors recorded when the case was established
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExpectedErrors {
    pub cl: Float,
    pub cd: Float,
    pub cm: Float,
    pub cp: Float,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub coefficient: Coefficient,
    pub computed: Float,
    pub reference: Float,
    pub difference: Float,
    pub relative_error: Float,
    pub expected: Float,
    pub passed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    pub label: String,
    pub comparisons: Vec<Comparison>,
}

impl ValidationReport {
    pub fn get(&self, coefficient: Coefficient) -> Option<&Comparison> {
        self.comparisons
            .iter()
            .find(|c| c.coefficient == coefficient)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidationCase {
    pub label: String,
    /// Angle of attack entry of the computed results
    pub aoa_index: usize,
    /// Reynolds number entry of the computed results
    pub re_index: usize,
    /// Surface point at which the pressure is compared
    pub cp_index: usize,
    pub reference: XfoilData,
    pub coefficients: ReferenceCoefficients,
    pub expected: ExpectedErrors,
    pub tolerance: Float,
}

impl ValidationCase {
    /// The same case, read at another Reynolds number column
    pub fn at_re_index(mut self, re_index: usize) -> Self {
        self.re_index = re_index;
        self
    }

    pub fn check(
        &self,
        properties: &AirfoilProperties,
    ) -> Result<ValidationReport, RegressionError> {
        let index = (self.aoa_index, self.re_index);
        let integrated = |coefficient, array: &ndarray::Array2<Float>| {
            array
                .get(index)
                .copied()
                .ok_or_else(|| RegressionError::OutOfRange {
                    coefficient,
                    index: format!("{:?}", index),
                    shape: format!("{:?}", array.dim()),
                })
        };
        let cl = integrated(Coefficient::Cl, &properties.cl)?;
        let cd = integrated(Coefficient::Cd, &properties.cd)?;
        let cm = integrated(Coefficient::Cm, &properties.cm)?;

        let cp_at = (self.cp_index, self.aoa_index, self.re_index);
        let cp = properties
            .cp
            .get(cp_at)
            .copied()
            .ok_or_else(|| RegressionError::OutOfRange {
                coefficient: Coefficient::Cp,
                index: format!("{:?}", cp_at),
                shape: format!("{:?}", properties.cp.dim()),
            })?;
        let cp_reference = self
            .reference
            .cp
            .get(self.cp_index)
            .copied()
            .ok_or_else(|| RegressionError::OutOfRange {
                coefficient: Coefficient::Cp,
                index: format!("{}", self.cp_index),
                shape: format!("reference of {} points", self.reference.cp.len()),
            })?;

        let comparisons = [
            (Coefficient::Cl, cl, self.coefficients.cl, self.expected.cl),
            (Coefficient::Cd, cd, self.coefficients.cd, self.expected.cd),
            (Coefficient::Cm, cm, self.coefficients.cm, self.expected.cm),
            (Coefficient::Cp, cp, cp_reference, self.expected.cp),
        ]
        .into_iter()
        .map(|(coefficient, computed, reference, expected)| {
            self.compare(coefficient, computed, reference, expected)
        })
        .collect::<Result<Vec<_>, _>>()?;

        let failures = comparisons
            .iter()
            .filter(|c| !c.passed)
            .cloned()
            .collect::<Vec<_>>();
        if !failures.is_empty() {
            return Err(RegressionError::Exceeded {
                label: self.label.clone(),
                failures,
            });
        }
        Ok(ValidationReport {
            label: self.label.clone(),
            comparisons,
        })
    }

    fn compare(
        &self,
        coefficient: Coefficient,
        computed: Float,
        reference: Float,
        expected: Float,
    ) -> Result<Comparison, RegressionError> {
        if reference == 0.0 {
            return Err(RegressionError::ZeroReference { coefficient });
        }
        let difference = (computed - reference).abs();
        let relative_error = relative_error(computed, reference);
        let passed = relative_error - expected < self.tolerance;

        log::info!(
            "{}: {} difference {:e} (relative error {:.6}, expected {:.6})",
            self.label,
            coefficient,
            difference,
            relative_error,
            expected
        );
        let margin = self.tolerance - (relative_error - expected);
        if passed && margin < 0.1 * self.tolerance {
            log::warn!(
                "{}: {} is within {:e} of its threshold",
                self.label,
                coefficient,
                margin
            );
        }

        Ok(Comparison {
            coefficient,
            computed,
            reference,
            difference,
            relative_error,
            expected,
            passed,
        })
    }
}

/// NACA 3310 at 4 degrees and Re = 5e6 against XFOIL, 160 panels.
///
/// `reference` is the XFOIL boundary-layer and pressure dump of the case.
pub fn naca_3310_4deg(reference: XfoilData) -> ValidationCase {
    ValidationCase {
        label: "NACA 3310 Validation at 4 deg".to_owned(),
        aoa_index: 4,
        re_index: 1,
        cp_index: 50,
        reference,
        coefficients: ReferenceCoefficients {
            cl: 0.7865,
            cd: 0.00507,
            cm: -0.0674,
        },
        expected: ExpectedErrors {
            cl: 0.21281484447415983,
            cd: 0.1719841745384137,
            cm: 0.385454350005437,
            cp: 0.05773430375306162,
        },
        tolerance: 1e-6,
    }
}
