use ndarray::Array4;
use serde::{Deserialize, Serialize};
use wake::{Corners, Float, WakeError, WakeGeometry, WakeResults};

/// Panel corner coordinates per axis, each array indexed by
/// `[propeller, time_step, blade, ring]`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub x: Corners<Array4<Float>>,
    pub y: Corners<Array4<Float>>,
    pub z: Corners<Array4<Float>>,
}

impl TryFrom<GeometryConfig> for WakeGeometry {
    type Error = WakeError;
    fn try_from(config: GeometryConfig) -> Result<Self, Self::Error> {
        WakeGeometry::from_arrays(config.x, config.y, config.z)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub title: Option<String>,
    pub geometry: GeometryConfig,
    pub results: WakeResults,
}

#[cfg(test)]
/// A single straight blade of two rings, one time step
fn example_configuration() -> Configuration {
    let dim = (1, 1, 1, 2);
    let corners = |f: fn(usize, usize, Float) -> Float| {
        Corners::from_fn(|corner| {
            let trailing = match corner {
                wake::Corner::A1 | wake::Corner::B1 => 0.0,
                wake::Corner::A2 | wake::Corner::B2 => 1.0,
            };
            let ring = match corner {
                wake::Corner::A1 | wake::Corner::A2 => 0,
                wake::Corner::B1 | wake::Corner::B2 => 1,
            };
            Array4::from_shape_fn(dim, |(_, t, _, r)| f(t, r + ring, trailing))
        })
    };
    Configuration {
        title: Some("Straight blade".to_owned()),
        geometry: GeometryConfig {
            x: corners(|t, _, trailing| t as Float + trailing),
            y: corners(|_, r, _| r as Float * 0.5),
            z: corners(|_, _, _| 0.0),
        },
        results: WakeResults::new(ndarray::arr1(&[1.0, 2.0, 3.0]), ndarray::arr1(&[0.0, 0.5, 0.0])),
    }
}

#[test]
fn configuration_roundtrip_exports() {
    let configuration = example_configuration();
    let text = json5::to_string(&configuration).unwrap();
    let configuration: Configuration = json5::from_str(&text).unwrap();
    assert_eq!(configuration.title.as_deref(), Some("Straight blade"));

    let geometry = WakeGeometry::try_from(configuration.geometry).unwrap();
    assert_eq!(geometry.shape().dim(), (1, 1, 1, 2));

    let mut buffer = Vec::new();
    wake::write_wake(
        &mut buffer,
        &geometry,
        &configuration.results,
        0,
        configuration.title.as_deref(),
    )
    .unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("# vtk DataFile Version 4.0\nStraight blade\nASCII\n"));
    assert!(text.contains("POINTS 6 float"));
    assert!(text.contains("CELLS 2 10"));
}

#[test]
fn handwritten_configuration() {
    let text = r#"{
        // one propeller, one time step, one blade, one ring
        geometry: {
            x: {
                a1: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                a2: { v: 1, dim: [1, 1, 1, 1], data: [1.0] },
                b1: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                b2: { v: 1, dim: [1, 1, 1, 1], data: [1.0] },
            },
            y: {
                a1: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                a2: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                b1: { v: 1, dim: [1, 1, 1, 1], data: [1.0] },
                b2: { v: 1, dim: [1, 1, 1, 1], data: [1.0] },
            },
            z: {
                a1: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                a2: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                b1: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
                b2: { v: 1, dim: [1, 1, 1, 1], data: [0.0] },
            },
        },
        results: {
            circulation: { v: 1, dim: [2], data: [10.0, 20.0] },
            tangential_induced_velocity: { v: 1, dim: [2], data: [1.0, 3.0] },
            additional: {
                axial: { v: 1, dim: [2], data: [0.0, 4.0] },
            },
        },
    }"#;
    let configuration: Configuration = json5::from_str(text).unwrap();
    assert!(configuration.title.is_none());
    assert_eq!(configuration.results.additional.len(), 1);

    let geometry = WakeGeometry::try_from(configuration.geometry).unwrap();
    let mut buffer = Vec::new();
    wake::write_wake(&mut buffer, &geometry, &configuration.results, 0, None).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.contains("SCALARS circulation float 1\nLOOKUP_TABLE default\n15\n"));
    assert!(text.contains("SCALARS vt float 1\nLOOKUP_TABLE default\n2\n"));
    assert!(text.contains("SCALARS axial float 1\nLOOKUP_TABLE default\n2\n"));
}
