//! Frame processor: depth frames in, region updates out
//!
//! For every region the processor samples a raw intensity, turns it into a
//! working distance, and compares it against what it last emitted. Only
//! regions that moved past the hysteresis gate produce an update.

mod reference;
mod update;

pub use reference::reference_positions;
pub use update::{FrameOutput, RegionUpdate};

use crate::config::SonifyConfig;
use crate::depth::{DepthBuffer, RegionSampler};
use crate::error::ConfigError;
use crate::grid::{GridLayout, Position, RegionCoordinate, RegionSoundState, SoundGrid};
use crate::mapping::{
    project_polar, round_to_tenths, HysteresisGate, LinearMapper, Mapper, MappingPipeline,
    SoundThreshold,
};
use tracing::{debug, warn};

/// Result of evaluating one region that passed the gate
struct Evaluation {
    update: RegionUpdate,
    frequency: f64,
    position: Position,
}

/// Maps depth frames onto the sound grid
///
/// Owns the [`SoundGrid`]; frames must be processed one at a time and in
/// capture order for the hysteresis comparisons to hold.
pub struct FrameProcessor {
    layout: GridLayout,
    sampler: Box<dyn RegionSampler>,
    distance: MappingPipeline,
    pitch: LinearMapper,
    gate: HysteresisGate,
    threshold: SoundThreshold,
    grid: SoundGrid,
}

impl FrameProcessor {
    /// Build a processor from a configuration
    pub fn new(config: &SonifyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let layout = config.layout()?;
        let grid = SoundGrid::new(&layout);

        Ok(Self {
            sampler: config.sampler.strategy.build(config.sampler.channel_offset),
            distance: config.normalizer()?.into_working_pipeline(),
            pitch: config.pitch_mapper()?,
            gate: config.hysteresis_gate()?,
            threshold: config.sound_threshold()?,
            layout,
            grid,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn grid(&self) -> &SoundGrid {
        &self.grid
    }

    pub fn sampler_name(&self) -> &str {
        self.sampler.name()
    }

    /// Forget everything emitted so far
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Mute every sounding region, returning the mutes to hand on
    ///
    /// Muted regions forget their last distance, so the next frame sounds
    /// them again whatever it reads.
    pub fn silence(&mut self) -> Vec<RegionUpdate> {
        let mut updates = Vec::new();
        for region in self.layout.regions() {
            if let Some(state) = self.grid.get_mut(region) {
                if state.on {
                    state.on = false;
                    state.last_distance = RegionSoundState::FAR;
                    updates.push(RegionUpdate::mute(region));
                }
            }
        }
        updates
    }

    /// Working distance for a raw intensity
    pub fn working_distance(&self, raw: f64) -> f64 {
        self.distance.apply(raw)
    }

    /// Evaluate every region of one depth frame
    ///
    /// Never fails: a buffer the sampler cannot read produces an empty
    /// output, and regions with a non-finite distance are skipped.
    pub fn process_frame(&mut self, buffer: &DepthBuffer) -> FrameOutput {
        let mut output = FrameOutput::default();
        let center = self.layout.center();

        for row in 0..self.layout.rows() {
            for column in 0..self.layout.columns() {
                let region = RegionCoordinate::new(column, row);

                let raw = match self.sampler.sample(buffer, region, &self.layout) {
                    Ok(raw) => raw,
                    Err(error) => {
                        warn!(%error, "unreadable depth frame, skipped");
                        output.skipped = self.layout.len();
                        output.updates.clear();
                        output.status = None;
                        return output;
                    }
                };

                let working = self.distance.apply(raw);
                if !working.is_finite() {
                    warn!(%region, raw, "non-finite distance, region skipped");
                    output.skipped += 1;
                    continue;
                }

                if let Some(eval) = self.evaluate_region(region, working) {
                    if region == center {
                        output.status = Some(format!(
                            "LOC({}) dist: {} freq {:.1}, {}",
                            region, working, eval.frequency, eval.position
                        ));
                    }
                    output.updates.push(eval.update);
                }
            }
        }

        for (row, distances) in self.grid.distance_rows().iter().enumerate() {
            debug!(row, ?distances, "last distances");
        }

        output
    }

    /// Apply one working distance to one region
    ///
    /// Returns `None` when the change is inside the hysteresis gate or the
    /// region is not part of the grid.
    pub fn evaluate(&mut self, region: RegionCoordinate, working: f64) -> Option<RegionUpdate> {
        self.evaluate_region(region, working).map(|eval| eval.update)
    }

    fn evaluate_region(&mut self, region: RegionCoordinate, working: f64) -> Option<Evaluation> {
        if !self.layout.contains(region) || !working.is_finite() {
            return None;
        }

        let state = self.grid.get_mut(region)?;
        if !self.gate.passes(state.last_distance, working) {
            return None;
        }
        state.last_distance = round_to_tenths(working);

        let (column_angle, row_angle) = self.layout.angles_for(region);
        let (x, z) = project_polar(working, column_angle);
        let (y, _) = project_polar(working, row_angle);
        let position = Position::new(round_to_tenths(x), round_to_tenths(y), round_to_tenths(z));
        let frequency = self.pitch.map(working);

        let update = if self.threshold.is_audible(working) {
            state.on = true;
            state.frequency = frequency;
            state.position = position;
            RegionUpdate::unmute(region, frequency, position)
        } else {
            state.on = false;
            RegionUpdate::mute(region)
        };

        Some(Evaluation {
            update,
            frequency,
            position,
        })
    }
}
