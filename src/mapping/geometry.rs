//! Geometry helpers for placing sources in listener space
//!
//! Angles are in degrees. A source straight ahead has angle 0, so its
//! whole distance lands on the second (depth) component.

use super::Mapper;

/// Project a distance along an angle, returning `(sin, cos)` components.
///
/// Non-finite inputs propagate into the result.
pub fn project_polar(distance: f64, angle_degrees: f64) -> (f64, f64) {
    let radians = angle_degrees.to_radians();
    (distance * radians.sin(), distance * radians.cos())
}

/// Round to one decimal place
pub fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Square root that keeps the sign of its input
pub fn signed_sqrt(value: f64) -> f64 {
    if value >= 0.0 {
        value.sqrt()
    } else {
        -(-value).sqrt()
    }
}

/// Mapper form of [`signed_sqrt`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedSqrt;

impl Mapper for SignedSqrt {
    fn name(&self) -> &str {
        "signed_sqrt"
    }

    fn map(&self, input: f64) -> f64 {
        signed_sqrt(input)
    }
}

/// Mapper form of [`round_to_tenths`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundTenths;

impl Mapper for RoundTenths {
    fn name(&self) -> &str {
        "round_tenths"
    }

    fn map(&self, input: f64) -> f64 {
        round_to_tenths(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_polar_straight_ahead() {
        assert_eq!(project_polar(1.5, 0.0), (0.0, 1.5));
    }

    #[test]
    fn test_project_polar_side() {
        let (a, b) = project_polar(2.0, 90.0);
        assert!((a - 2.0).abs() < 1e-12);
        assert!(b.abs() < 1e-12);

        let (a, _) = project_polar(2.0, -90.0);
        assert!((a + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_project_polar_propagates_nan() {
        let (a, b) = project_polar(f64::NAN, 40.0);
        assert!(a.is_nan());
        assert!(b.is_nan());
    }

    #[test]
    fn test_round_to_tenths() {
        assert_eq!(round_to_tenths(8.689), 8.7);
        assert_eq!(round_to_tenths(12.247), 12.2);
        assert_eq!(round_to_tenths(-1.96), -2.0);
        assert_eq!(round_to_tenths(3.0), 3.0);
    }

    #[test]
    fn test_signed_sqrt() {
        assert_eq!(signed_sqrt(4.0), 2.0);
        assert_eq!(signed_sqrt(-4.0), -2.0);
        assert_eq!(signed_sqrt(0.0), 0.0);
    }
}
