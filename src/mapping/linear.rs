//! Linear range scaling

use super::Mapper;
use crate::error::ConfigError;

/// Clamp `value` into `[in_min, in_max]` and map it linearly onto
/// `[out_min, out_max]`.
///
/// The output range may be inverted (`out_min > out_max`). `in_min` must
/// differ from `in_max`; a degenerate input range divides by zero.
pub fn scale_linear(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    debug_assert!(in_max != in_min, "degenerate input range");

    let mut x = value;
    if x > in_max {
        x = in_max;
    }
    if x < in_min {
        x = in_min;
    }

    let factor = (x - in_min) / (in_max - in_min);
    factor * (out_max - out_min) + out_min
}

/// Linear interpolation mapper with input clamping
#[derive(Debug, Clone)]
pub struct LinearMapper {
    name: String,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
}

impl LinearMapper {
    /// Create a new linear mapper
    ///
    /// Fails if the input range is degenerate or any bound is not finite.
    pub fn new(
        name: &'static str,
        in_min: f64,
        in_max: f64,
        out_min: f64,
        out_max: f64,
    ) -> Result<Self, ConfigError> {
        if [in_min, in_max, out_min, out_max].iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name,
                reason: "range bounds must be finite".to_string(),
            });
        }
        if in_min == in_max {
            return Err(ConfigError::DegenerateRange { name, min: in_min });
        }

        Ok(Self {
            name: name.to_string(),
            in_min,
            in_max,
            out_min,
            out_max,
        })
    }
}

impl Mapper for LinearMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn map(&self, input: f64) -> f64 {
        scale_linear(input, self.in_min, self.in_max, self.out_min, self.out_max)
    }
}
