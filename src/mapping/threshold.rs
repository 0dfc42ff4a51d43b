//! Threshold rules applied to working distances
//!
//! `HysteresisGate` decides whether a region changed enough to be worth
//! re-emitting; `SoundThreshold` decides whether a region is audible at all.

use crate::error::ConfigError;

/// Debounce gate on the change between the last emitted value and a new one
///
/// A change strictly smaller than the gate width is ignored. Depth sensors
/// jitter by a fraction of the working range from frame to frame, and
/// re-tuning an oscillator on every frame is audible as warble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisGate {
    width: f64,
}

impl HysteresisGate {
    /// Create a gate of the given width
    pub fn new(width: f64) -> Result<Self, ConfigError> {
        if !width.is_finite() || width < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "sound.hysteresis",
                reason: format!("must be a finite value >= 0, got {}", width),
            });
        }
        Ok(Self { width })
    }

    /// Gate width
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns true if `current` moved far enough away from `last`
    pub fn passes(&self, last: f64, current: f64) -> bool {
        (current - last).abs() >= self.width
    }
}

/// Distance at and beyond which a region is silent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundThreshold {
    distance: f64,
}

impl SoundThreshold {
    /// Create a threshold at the given distance
    pub fn new(distance: f64) -> Result<Self, ConfigError> {
        if !distance.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "sound.threshold",
                reason: format!("must be finite, got {}", distance),
            });
        }
        Ok(Self { distance })
    }

    /// Threshold distance
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns true if a source at `distance` should sound
    pub fn is_audible(&self, distance: f64) -> bool {
        distance < self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_blocks_small_changes() {
        let gate = HysteresisGate::new(2.24).unwrap();

        assert!(!gate.passes(5.0, 5.0));
        assert!(!gate.passes(5.0, 7.2));
        assert!(!gate.passes(5.0, 2.8));
    }

    #[test]
    fn test_gate_passes_large_changes() {
        let gate = HysteresisGate::new(2.24).unwrap();

        assert!(gate.passes(5.0, 7.3));
        assert!(gate.passes(5.0, 2.7));
        assert!(gate.passes(0.0, 12.2));
    }

    #[test]
    fn test_gate_passes_from_sentinel() {
        let gate = HysteresisGate::new(2.24).unwrap();
        assert!(gate.passes(f64::MAX, 12.2));
        assert!(gate.passes(f64::MAX, 0.0));
    }

    #[test]
    fn test_gate_blocks_nan() {
        let gate = HysteresisGate::new(2.24).unwrap();
        assert!(!gate.passes(5.0, f64::NAN));
    }

    #[test]
    fn test_zero_width_gate() {
        let gate = HysteresisGate::new(0.0).unwrap();
        assert!(gate.passes(5.0, 5.0));
    }

    #[test]
    fn test_gate_rejects_negative_width() {
        assert!(HysteresisGate::new(-1.0).is_err());
        assert!(HysteresisGate::new(f64::NAN).is_err());
    }

    #[test]
    fn test_sound_threshold() {
        let threshold = SoundThreshold::new(12.0).unwrap();

        assert!(threshold.is_audible(11.9));
        assert!(!threshold.is_audible(12.0));
        assert!(!threshold.is_audible(12.5));
    }
}
