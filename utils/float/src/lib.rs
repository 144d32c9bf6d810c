//! The Float type shared by the wake exporter and the airfoil regression crates

/// Type used for coordinates and coefficients, configure with the `f32` feature
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(not(feature = "f32"))]
/// Type used for coordinates and coefficients, configure with the `f32` feature
pub type Float = f64;

/// Associated constants for [`Float`]
pub mod consts {
    #[cfg(feature = "f32")]
    pub use std::f32::consts::*;
    #[cfg(not(feature = "f32"))]
    pub use std::f64::consts::*;
}

/// Round to a fixed number of decimals, half away from zero.
///
/// Used wherever output precision is part of a file contract.
pub fn round_to(value: Float, decimals: i32) -> Float {
    let scale = (10.0 as Float).powi(decimals);
    let scaled = value * scale;
    if value.fract() == 0.0 || !scaled.is_finite() {
        // Integral already, which includes everything too large to scale
        return value;
    }
    scaled.round() / scale
}

#[test]
fn rounding_to_four_decimals() {
    assert_eq!(round_to(1.23456789, 4), 1.2346);
    assert_eq!(round_to(-1.23456789, 4), -1.2346);
    assert_eq!(round_to(0.0, 4), 0.0);
    assert_eq!(round_to(2.5, 0), 3.0);
}

#[test]
fn rounding_keeps_huge_values() {
    let huge = Float::MAX / 10.0;
    assert_eq!(round_to(huge, 4), huge);
    assert_eq!(round_to(-huge, 4), -huge);
    assert!(round_to(Float::INFINITY, 4).is_infinite());
}
