//! Interface to an external airfoil panel-method solver
//!
//! Solvers either implement [`AirfoilAnalysis`] directly, producing all
//! conditions at once, or implement [`PointSolver`] for a single angle of
//! attack and Reynolds number and get wrapped in a [`Sweep`].

use crate::error::AnalysisError;
use crate::Float;
use ndarray::{s, Array1, Array2, Array3, ArrayView1};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Airfoil surface coordinates, ordered around the contour
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AirfoilGeometry {
    pub name: String,
    pub x: Array1<Float>,
    pub y: Array1<Float>,
}

impl AirfoilGeometry {
    pub fn new(
        name: impl Into<String>,
        x: Array1<Float>,
        y: Array1<Float>,
    ) -> Result<Self, AnalysisError> {
        let name = name.into();
        if x.len() != y.len() {
            return Err(AnalysisError::Geometry {
                name,
                reason: format!("{} x-coordinates but {} y-coordinates", x.len(), y.len()),
            });
        }
        if x.len() < 3 {
            return Err(AnalysisError::Geometry {
                name,
                reason: format!("a closed contour needs at least 3 points, got {}", x.len()),
            });
        }
        Ok(Self { name, x, y })
    }
    pub fn npoints(&self) -> usize {
        self.x.len()
    }
}

#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Every Reynolds number at every angle of attack
    Batch,
    /// One Reynolds number per angle of attack
    Single,
}

/// Flow conditions to analyse, angles in radians
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "ConditionsConfig"))]
#[derive(Clone, Debug, PartialEq)]
pub struct Conditions {
    aoa: Array1<Float>,
    re: Array1<Float>,
    mode: AnalysisMode,
}

/// Unchecked form of [`Conditions`] as read from a configuration
#[cfg(feature = "serde1")]
#[derive(Deserialize)]
struct ConditionsConfig {
    aoa: Array1<Float>,
    re: Array1<Float>,
    mode: AnalysisMode,
}

#[cfg(feature = "serde1")]
impl TryFrom<ConditionsConfig> for Conditions {
    type Error = AnalysisError;
    fn try_from(config: ConditionsConfig) -> Result<Self, Self::Error> {
        Self::new(config.aoa, config.re, config.mode)
    }
}

impl Conditions {
    pub fn new(
        aoa: Array1<Float>,
        re: Array1<Float>,
        mode: AnalysisMode,
    ) -> Result<Self, AnalysisError> {
        match mode {
            AnalysisMode::Batch => Ok(Self::batch(aoa, re)),
            AnalysisMode::Single => Self::single(aoa, re),
        }
    }
    pub fn batch(aoa: Array1<Float>, re: Array1<Float>) -> Self {
        Self {
            aoa,
            re,
            mode: AnalysisMode::Batch,
        }
    }
    pub fn single(aoa: Array1<Float>, re: Array1<Float>) -> Result<Self, AnalysisError> {
        if aoa.len() != re.len() {
            return Err(AnalysisError::ConditionCount {
                aoa: aoa.len(),
                re: re.len(),
            });
        }
        Ok(Self {
            aoa,
            re,
            mode: AnalysisMode::Single,
        })
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }
    pub fn aoa(&self) -> ArrayView1<Float> {
        self.aoa.view()
    }
    pub fn re(&self) -> ArrayView1<Float> {
        self.re.view()
    }
    pub fn n_aoa(&self) -> usize {
        self.aoa.len()
    }
    /// Number of result columns
    pub fn n_re(&self) -> usize {
        match self.mode {
            AnalysisMode::Batch => self.re.len(),
            AnalysisMode::Single => 1,
        }
    }
    /// Reynolds number of result entry `[aoa_index, re_index]`
    pub fn reynolds(&self, aoa_index: usize, re_index: usize) -> Float {
        match self.mode {
            AnalysisMode::Batch => self.re[re_index],
            AnalysisMode::Single => {
                debug_assert_eq!(re_index, 0);
                self.re[aoa_index]
            }
        }
    }
}

/// `n` angles of attack from `start` to `end` degrees, in radians
pub fn degrees_linspace(start: Float, end: Float, n: usize) -> Array1<Float> {
    Array1::linspace(start, end, n).mapv_into(Float::to_radians)
}

/// Aerodynamic coefficients, indexed `[aoa, re]`, and surface pressure,
/// indexed `[panel, aoa, re]`
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AirfoilProperties {
    pub cl: Array2<Float>,
    pub cd: Array2<Float>,
    pub cm: Array2<Float>,
    pub cp: Array3<Float>,
}

impl AirfoilProperties {
    pub fn new(
        cl: Array2<Float>,
        cd: Array2<Float>,
        cm: Array2<Float>,
        cp: Array3<Float>,
    ) -> Result<Self, AnalysisError> {
        for (what, array) in [("Cd", &cd), ("Cm", &cm)] {
            if array.dim() != cl.dim() {
                return Err(AnalysisError::ShapeMismatch {
                    what: what.to_owned(),
                    expected: format!("{:?}", cl.dim()),
                    found: format!("{:?}", array.dim()),
                });
            }
        }
        let (_, n_aoa, n_re) = cp.dim();
        if (n_aoa, n_re) != cl.dim() {
            return Err(AnalysisError::ShapeMismatch {
                what: "Cp".to_owned(),
                expected: format!("(_, {}, {})", cl.dim().0, cl.dim().1),
                found: format!("{:?}", cp.dim()),
            });
        }
        Ok(Self { cl, cd, cm, cp })
    }

    pub fn zeros(npanel: usize, n_aoa: usize, n_re: usize) -> Self {
        Self {
            cl: Array2::zeros((n_aoa, n_re)),
            cd: Array2::zeros((n_aoa, n_re)),
            cm: Array2::zeros((n_aoa, n_re)),
            cp: Array3::zeros((npanel, n_aoa, n_re)),
        }
    }

    pub fn npanel(&self) -> usize {
        self.cp.dim().0
    }
    pub fn n_aoa(&self) -> usize {
        self.cl.dim().0
    }
    pub fn n_re(&self) -> usize {
        self.cl.dim().1
    }
}

/// Injected panel-method analysis
pub trait AirfoilAnalysis {
    fn analyse(
        &self,
        geometry: &AirfoilGeometry,
        conditions: &Conditions,
        npanel: usize,
    ) -> Result<AirfoilProperties, AnalysisError>;
}

/// Result of a single-condition solve
#[derive(Clone, Debug, PartialEq)]
pub struct PointProperties {
    pub cl: Float,
    pub cd: Float,
    pub cm: Float,
    /// One value per panel
    pub cp: Array1<Float>,
}

/// A solver for one angle of attack (radians) and one Reynolds number
pub trait PointSolver {
    fn solve(
        &self,
        geometry: &AirfoilGeometry,
        aoa: Float,
        re: Float,
        npanel: usize,
    ) -> Result<PointProperties, AnalysisError>;
}

/// Runs a [`PointSolver`] over all requested conditions
#[derive(Clone, Debug, Default)]
pub struct Sweep<S>(pub S);

impl<S: PointSolver> AirfoilAnalysis for Sweep<S> {
    fn analyse(
        &self,
        geometry: &AirfoilGeometry,
        conditions: &Conditions,
        npanel: usize,
    ) -> Result<AirfoilProperties, AnalysisError> {
        let (n_aoa, n_re) = (conditions.n_aoa(), conditions.n_re());
        log::debug!(
            "Analysing {} with {} panels, {:?} mode, {} x {} conditions",
            geometry.name,
            npanel,
            conditions.mode(),
            n_aoa,
            n_re
        );
        let mut properties = AirfoilProperties::zeros(npanel, n_aoa, n_re);

        for (i, &aoa) in conditions.aoa().iter().enumerate() {
            for j in 0..n_re {
                let re = conditions.reynolds(i, j);
                let point = self.0.solve(geometry, aoa, re, npanel)?;
                if point.cp.len() != npanel {
                    return Err(AnalysisError::ShapeMismatch {
                        what: format!("Cp at alpha = {:.2} deg", aoa.to_degrees()),
                        expected: format!("{} panels", npanel),
                        found: format!("{} panels", point.cp.len()),
                    });
                }
                properties.cl[(i, j)] = point.cl;
                properties.cd[(i, j)] = point.cd;
                properties.cm[(i, j)] = point.cm;
                properties.cp.slice_mut(s![.., i, j]).assign(&point.cp);
            }
        }
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Linear;

    impl PointSolver for Linear {
        fn solve(
            &self,
            _geometry: &AirfoilGeometry,
            aoa: Float,
            re: Float,
            npanel: usize,
        ) -> Result<PointProperties, AnalysisError> {
            Ok(PointProperties {
                cl: aoa,
                cd: re,
                cm: -aoa,
                cp: Array1::from_elem(npanel, aoa + re),
            })
        }
    }

    fn square() -> AirfoilGeometry {
        AirfoilGeometry::new(
            "square",
            ndarray::arr1(&[1.0, 0.0, 0.0, 1.0]),
            ndarray::arr1(&[0.0, 0.0, 1.0, 1.0]),
        )
        .unwrap()
    }

    #[test]
    fn batch_covers_every_combination() {
        let conditions = Conditions::batch(
            ndarray::arr1(&[0.0, 0.1, 0.2]),
            ndarray::arr1(&[1e5, 1e6]),
        );
        let properties = Sweep(Linear).analyse(&square(), &conditions, 5).unwrap();
        assert_eq!(properties.cl.dim(), (3, 2));
        assert_eq!(properties.cp.dim(), (5, 3, 2));
        assert_eq!(properties.cl[(2, 1)], 0.2);
        assert_eq!(properties.cd[(2, 1)], 1e6);
        assert_eq!(properties.cd[(0, 0)], 1e5);
        assert_eq!(properties.cp[(4, 1, 0)], 0.1 + 1e5);
    }

    #[test]
    fn single_pairs_conditions() {
        let conditions = Conditions::single(
            ndarray::arr1(&[0.0, 0.1, 0.2]),
            ndarray::arr1(&[1e5, 2e5, 3e5]),
        )
        .unwrap();
        let properties = Sweep(Linear).analyse(&square(), &conditions, 2).unwrap();
        assert_eq!(properties.cl.dim(), (3, 1));
        assert_eq!(properties.cd.column(0).to_vec(), [1e5, 2e5, 3e5]);

        assert!(matches!(
            Conditions::single(ndarray::arr1(&[0.0]), ndarray::arr1(&[1e5, 2e5])),
            Err(AnalysisError::ConditionCount { aoa: 1, re: 2 })
        ));
    }

    #[test]
    fn conditions_from_mode() {
        let aoa = ndarray::arr1(&[0.0, 0.1, 0.2]);
        let batch = Conditions::new(aoa.clone(), ndarray::arr1(&[1e5]), AnalysisMode::Batch);
        assert_eq!(batch.unwrap().n_re(), 1);
        assert!(matches!(
            Conditions::new(aoa, ndarray::arr1(&[1e5]), AnalysisMode::Single),
            Err(AnalysisError::ConditionCount { aoa: 3, re: 1 })
        ));
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn deserialized_conditions_are_checked() {
        let single = "{
            aoa: { v: 1, dim: [3], data: [0.0, 0.1, 0.2] },
            re: { v: 1, dim: [1], data: [1e5] },
            mode: 'single',
        }";
        let err = json5::from_str::<Conditions>(single).unwrap_err();
        assert!(err.to_string().contains("3 angles of attack"), "{}", err);

        let batch = single.replace("single", "batch");
        let conditions: Conditions = json5::from_str(&batch).unwrap();
        let properties = Sweep(Linear).analyse(&square(), &conditions, 2).unwrap();
        assert_eq!(properties.cl.dim(), (3, 1));

        let paired = single.replace("dim: [1], data: [1e5]", "dim: [3], data: [1e5, 2e5, 3e5]");
        let conditions: Conditions = json5::from_str(&paired).unwrap();
        assert_eq!(conditions.mode(), AnalysisMode::Single);
        assert_eq!(conditions.reynolds(2, 0), 3e5);
    }

    #[test]
    fn angles_in_radians() {
        let aoa = degrees_linspace(-4.0, 16.0, 11);
        assert_eq!(aoa.len(), 11);
        approx::assert_abs_diff_eq!(aoa[4], (4.0 as Float).to_radians(), epsilon = 1e-12);
        approx::assert_abs_diff_eq!(aoa[10], (16.0 as Float).to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn property_shapes_are_checked() {
        let ok = AirfoilProperties::zeros(4, 3, 2);
        let with = |cd: Array2<Float>, cp: Array3<Float>| {
            AirfoilProperties::new(ok.cl.clone(), cd, ok.cm.clone(), cp)
        };
        assert!(with(ok.cd.clone(), ok.cp.clone()).is_ok());
        assert!(matches!(
            with(Array2::zeros((3, 1)), ok.cp.clone()),
            Err(AnalysisError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            with(ok.cd.clone(), Array3::zeros((4, 2, 3))),
            Err(AnalysisError::ShapeMismatch { .. })
        ));

        let (x, y) = (ndarray::arr1(&[0.0, 1.0]), ndarray::arr1(&[0.0, 0.0]));
        assert!(AirfoilGeometry::new("line", x, y).is_err());
    }
}
