//! Raw intensity to calibrated distance

use crate::error::ConfigError;
use crate::mapping::{LinearMapper, Mapper, MappingPipeline, RoundTenths, SignedSqrt};

/// Converts raw sensor intensity into calibrated distance
///
/// The sensor reports nearer surfaces as brighter, so the default output
/// range is inverted: `in_max` maps to the nearest distance.
#[derive(Debug, Clone)]
pub struct DistanceNormalizer {
    calibration: LinearMapper,
}

impl DistanceNormalizer {
    pub const DEFAULT_IN_MIN: f64 = 160.0;
    pub const DEFAULT_IN_MAX: f64 = 210.0;
    pub const DEFAULT_OUT_MIN: f64 = 150.0;
    pub const DEFAULT_OUT_MAX: f64 = 1.0;

    /// Normalizer with the stock calibration of the reference sensor
    pub fn stock() -> Result<Self, ConfigError> {
        Self::new(
            Self::DEFAULT_IN_MIN,
            Self::DEFAULT_IN_MAX,
            Self::DEFAULT_OUT_MIN,
            Self::DEFAULT_OUT_MAX,
        )
    }

    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            calibration: LinearMapper::new("calibration", in_min, in_max, out_min, out_max)?,
        })
    }

    pub fn normalize(&self, raw: f64) -> f64 {
        self.calibration.map(raw)
    }

    /// Full raw-to-working-distance chain: calibrate, signed square root,
    /// round to tenths
    pub fn into_working_pipeline(self) -> MappingPipeline {
        MappingPipeline::new()
            .with(self)
            .with(SignedSqrt)
            .with(RoundTenths)
    }
}

impl Mapper for DistanceNormalizer {
    fn name(&self) -> &str {
        "calibration"
    }

    fn map(&self, input: f64) -> f64 {
        self.normalize(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration() {
        let normalizer = DistanceNormalizer::stock().unwrap();

        assert_eq!(normalizer.normalize(160.0), 150.0);
        assert_eq!(normalizer.normalize(185.0), 75.5);
        assert_eq!(normalizer.normalize(210.0), 1.0);
    }

    #[test]
    fn test_brighter_is_nearer() {
        let normalizer = DistanceNormalizer::stock().unwrap();
        assert!(normalizer.normalize(200.0) < normalizer.normalize(170.0));
    }

    #[test]
    fn test_clamps_out_of_range_intensity() {
        let normalizer = DistanceNormalizer::stock().unwrap();

        assert_eq!(normalizer.normalize(0.0), 150.0);
        assert_eq!(normalizer.normalize(255.0), 1.0);
    }

    #[test]
    fn test_custom_sensor_range() {
        let normalizer = DistanceNormalizer::new(0.0, 255.0, 100.0, 0.0).unwrap();
        assert_eq!(normalizer.normalize(255.0), 0.0);
        assert_eq!(normalizer.normalize(0.0), 100.0);
    }

    #[test]
    fn test_degenerate_range_rejected() {
        assert!(DistanceNormalizer::new(200.0, 200.0, 150.0, 1.0).is_err());
    }

    #[test]
    fn test_working_pipeline() {
        let pipeline = DistanceNormalizer::stock().unwrap().into_working_pipeline();

        assert_eq!(pipeline.apply(185.0), 8.7);
        assert_eq!(pipeline.apply(160.0), 12.2);
        assert_eq!(pipeline.apply(210.0), 1.0);
    }
}
