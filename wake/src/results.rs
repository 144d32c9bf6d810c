use crate::error::WakeError;
use crate::Float;
use indexmap::IndexMap;
use ndarray::{Array1, ArrayView1};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Rotor results sampled on the ring boundaries of a blade.
///
/// Every field holds `rings + 1` values, one per ring boundary from root
/// to tip. The same distribution is applied to every blade.
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct WakeResults {
    pub circulation: Array1<Float>,
    pub tangential_induced_velocity: Array1<Float>,
    /// Further fields, written after the two above in insertion order
    #[cfg_attr(feature = "serde1", serde(default))]
    pub additional: IndexMap<String, Array1<Float>>,
}

/// A named per-ring distribution
#[derive(Clone, Debug)]
pub struct ScalarField<'a> {
    pub name: &'a str,
    pub values: ArrayView1<'a, Float>,
}

impl WakeResults {
    pub fn new(circulation: Array1<Float>, tangential_induced_velocity: Array1<Float>) -> Self {
        Self {
            circulation,
            tangential_induced_velocity,
            additional: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, values: Array1<Float>) -> Self {
        self.additional.insert(name.into(), values);
        self
    }

    /// Fields in output order, named as they appear in the mesh file
    pub fn fields(&self) -> impl Iterator<Item = ScalarField<'_>> {
        let required: [(&str, ArrayView1<Float>); 2] = [
            ("circulation", self.circulation.view()),
            ("vt", self.tangential_induced_velocity.view()),
        ];
        required
            .into_iter()
            .chain(
                self.additional
                    .iter()
                    .map(|(name, values)| (name.as_str(), values.view())),
            )
            .map(|(name, values)| ScalarField { name, values })
    }

    /// Every field must be named by a single unique token and hold
    /// `rings + 1` samples
    pub fn validate(&self, rings: usize) -> Result<(), WakeError> {
        let mut seen = Vec::new();
        for field in self.fields() {
            let reason = if field.name.is_empty() {
                Some("name is empty")
            } else if field
                .name
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
            {
                Some("name contains whitespace or control characters")
            } else if seen.contains(&field.name) {
                Some("name is used by an earlier field")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(WakeError::FieldName {
                    name: field.name.to_owned(),
                    reason,
                });
            }
            seen.push(field.name);
        }

        for field in self.fields() {
            if field.values.len() != rings + 1 {
                return Err(WakeError::FieldLength {
                    name: field.name.to_owned(),
                    expected: rings + 1,
                    found: field.values.len(),
                });
            }
        }
        Ok(())
    }
}

#[test]
fn fields_in_output_order() {
    let results = WakeResults::new(ndarray::arr1(&[1.0, 2.0]), ndarray::arr1(&[3.0, 4.0]))
        .with_field("gamma", ndarray::arr1(&[5.0, 6.0]));
    let names = results.fields().map(|f| f.name).collect::<Vec<_>>();
    assert_eq!(names, ["circulation", "vt", "gamma"]);
    assert!(results.validate(1).is_ok());

    match results.validate(2) {
        Err(WakeError::FieldLength {
            name,
            expected,
            found,
        }) => {
            assert_eq!(name, "circulation");
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("expected a length error, got {:?}", other),
    }
}

#[test]
fn field_names_are_single_tokens() {
    let base = || WakeResults::new(ndarray::arr1(&[1.0, 2.0]), ndarray::arr1(&[3.0, 4.0]));
    let values = || ndarray::arr1(&[5.0, 6.0]);
    assert!(base().with_field("axial_velocity", values()).validate(1).is_ok());

    for name in ["", "axial velocity", "line\nbreak", "tab\t", "circulation", "vt"] {
        match base().with_field(name, values()).validate(1) {
            Err(WakeError::FieldName { name: found, .. }) => assert_eq!(found, name),
            other => panic!("expected `{:?}` to be rejected, got {:?}", name, other),
        }
    }
}
