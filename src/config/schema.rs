//! Configuration schema definitions

use crate::depth::{DistanceNormalizer, SamplerKind};
use crate::error::ConfigError;
use crate::grid::{AngleTable, GridLayout, DEFAULT_COLUMN_ANGLES, DEFAULT_ROW_ANGLES};
use crate::mapping::{HysteresisGate, LinearMapper, SoundThreshold};
use serde::{Deserialize, Serialize};

/// Main configuration for the sonification pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SonifyConfig {
    /// Region grid and source angles
    #[serde(default)]
    pub grid: GridConfig,

    /// Raw intensity to calibrated distance
    #[serde(default = "default_calibration")]
    pub calibration: RangeConfig,

    /// Working distance to oscillator frequency
    #[serde(default = "default_pitch")]
    pub pitch: RangeConfig,

    /// Audibility and debounce settings
    #[serde(default)]
    pub sound: SoundConfig,

    /// Region sampling strategy
    #[serde(default)]
    pub sampler: SamplerConfig,

    /// Expected depth frames
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl Default for SonifyConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            calibration: default_calibration(),
            pitch: default_pitch(),
            sound: SoundConfig::default(),
            sampler: SamplerConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl SonifyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = self.layout()?;
        self.normalizer()?;
        self.pitch_mapper()?;
        self.hysteresis_gate()?;
        self.sound_threshold()?;

        if !(0.0..=1.0).contains(&self.sound.amplitude) {
            return Err(ConfigError::InvalidValue {
                name: "sound.amplitude",
                reason: format!("must be between 0.0 and 1.0, got {}", self.sound.amplitude),
            });
        }
        if !self.sound.reference_distance.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "sound.reference_distance",
                reason: "must be finite".to_string(),
            });
        }
        if self.sampler.channel_offset >= 4 {
            return Err(ConfigError::InvalidValue {
                name: "sampler.channel_offset",
                reason: format!("must be below 4, got {}", self.sampler.channel_offset),
            });
        }
        if self.capture.fps == 0 || self.capture.fps > 120 {
            return Err(ConfigError::InvalidValue {
                name: "capture.fps",
                reason: format!("must be between 1 and 120, got {}", self.capture.fps),
            });
        }
        if self.capture.width < layout.columns() || self.capture.height < layout.rows() {
            return Err(ConfigError::BufferSmallerThanGrid {
                width: self.capture.width,
                height: self.capture.height,
                columns: layout.columns(),
                rows: layout.rows(),
            });
        }

        Ok(())
    }

    pub fn layout(&self) -> Result<GridLayout, ConfigError> {
        GridLayout::new(
            self.grid.rows,
            self.grid.columns,
            AngleTable::new(self.grid.column_angles.clone(), self.grid.row_angles.clone()),
        )
    }

    pub fn normalizer(&self) -> Result<DistanceNormalizer, ConfigError> {
        let c = &self.calibration;
        DistanceNormalizer::new(c.in_min, c.in_max, c.out_min, c.out_max)
    }

    pub fn pitch_mapper(&self) -> Result<LinearMapper, ConfigError> {
        let p = &self.pitch;
        LinearMapper::new("pitch", p.in_min, p.in_max, p.out_min, p.out_max)
    }

    pub fn hysteresis_gate(&self) -> Result<HysteresisGate, ConfigError> {
        HysteresisGate::new(self.sound.hysteresis)
    }

    pub fn sound_threshold(&self) -> Result<SoundThreshold, ConfigError> {
        SoundThreshold::new(self.sound.threshold)
    }
}

/// Region grid configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Number of region rows (default: 3)
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of region columns (default: 5)
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Horizontal angle of each column in degrees, left to right
    #[serde(default = "default_column_angles")]
    pub column_angles: Vec<f64>,

    /// Vertical angle of each row in degrees, top to bottom
    #[serde(default = "default_row_angles")]
    pub row_angles: Vec<f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
            column_angles: default_column_angles(),
            row_angles: default_row_angles(),
        }
    }
}

fn default_rows() -> usize { DEFAULT_ROW_ANGLES.len() }
fn default_columns() -> usize { DEFAULT_COLUMN_ANGLES.len() }
fn default_column_angles() -> Vec<f64> { DEFAULT_COLUMN_ANGLES.to_vec() }
fn default_row_angles() -> Vec<f64> { DEFAULT_ROW_ANGLES.to_vec() }

/// A clamped linear mapping between two ranges
///
/// The output range may run backwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeConfig {
    /// Input range minimum
    pub in_min: f64,

    /// Input range maximum
    pub in_max: f64,

    /// Output for inputs at or below `in_min`
    pub out_min: f64,

    /// Output for inputs at or above `in_max`
    pub out_max: f64,
}

fn default_calibration() -> RangeConfig {
    RangeConfig {
        in_min: DistanceNormalizer::DEFAULT_IN_MIN,
        in_max: DistanceNormalizer::DEFAULT_IN_MAX,
        out_min: DistanceNormalizer::DEFAULT_OUT_MIN,
        out_max: DistanceNormalizer::DEFAULT_OUT_MAX,
    }
}

fn default_pitch() -> RangeConfig {
    RangeConfig {
        in_min: 1.5,
        in_max: 10.0,
        out_min: 350.0,
        out_max: 250.0,
    }
}

/// Audibility and debounce settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoundConfig {
    /// Working distance at and beyond which a region is muted (default: 12.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Smallest working-distance change that is re-emitted (default: 2.24)
    #[serde(default = "default_hysteresis")]
    pub hysteresis: f64,

    /// Oscillator amplitude while a region sounds (default: 0.18)
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Distance used to lay out the reference tones (default: 1.5)
    #[serde(default = "default_reference_distance")]
    pub reference_distance: f64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            hysteresis: default_hysteresis(),
            amplitude: default_amplitude(),
            reference_distance: default_reference_distance(),
        }
    }
}

fn default_threshold() -> f64 { 12.0 }
// A fifth of the audible working range
fn default_hysteresis() -> f64 { (12.2 - 1.0) / 5.0 }
fn default_amplitude() -> f64 { 0.18 }
fn default_reference_distance() -> f64 { 1.5 }

/// Region sampling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SamplerConfig {
    /// Sampling strategy (default: average)
    #[serde(default)]
    pub strategy: SamplerKind,

    /// Byte within each pixel holding the intensity (default: 0)
    #[serde(default)]
    pub channel_offset: usize,
}

/// Expected depth frame stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    /// Frames per second (default: 5)
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Frame width in pixels (default: 299)
    #[serde(default = "default_frame_size")]
    pub width: usize,

    /// Frame height in pixels (default: 299)
    #[serde(default = "default_frame_size")]
    pub height: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            width: default_frame_size(),
            height: default_frame_size(),
        }
    }
}

fn default_fps() -> u32 { 5 }
fn default_frame_size() -> usize { 299 }
