//! Sound-grid state: the last emitted parameters of every region

use super::{GridLayout, RegionCoordinate};
use serde::Serialize;
use std::fmt;

/// Position of a source relative to the listener
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x:{}, y:{}, z:{}", self.x, self.y, self.z)
    }
}

/// What the pipeline last told the renderer about one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSoundState {
    /// Last distance that passed the hysteresis gate
    pub last_distance: f64,
    pub on: bool,
    pub frequency: f64,
    pub position: Position,
}

impl RegionSoundState {
    /// Sentinel distance for a region that has never been evaluated
    pub const FAR: f64 = f64::MAX;
}

impl Default for RegionSoundState {
    fn default() -> Self {
        Self {
            last_distance: Self::FAR,
            on: false,
            frequency: 0.0,
            position: Position::default(),
        }
    }
}

/// Table of [`RegionSoundState`], one per region, stored row-major
#[derive(Debug, Clone)]
pub struct SoundGrid {
    layout: GridLayout,
    regions: Vec<RegionSoundState>,
}

impl SoundGrid {
    /// Create a grid where every region is off and far away
    pub fn new(layout: &GridLayout) -> Self {
        Self {
            layout: layout.clone(),
            regions: vec![RegionSoundState::default(); layout.len()],
        }
    }

    pub fn get(&self, region: RegionCoordinate) -> Option<&RegionSoundState> {
        if !self.layout.contains(region) {
            return None;
        }
        self.regions.get(self.layout.index_of(region))
    }

    pub(crate) fn get_mut(&mut self, region: RegionCoordinate) -> Option<&mut RegionSoundState> {
        if !self.layout.contains(region) {
            return None;
        }
        self.regions.get_mut(self.layout.index_of(region))
    }

    /// Put every region back into its initial state
    pub fn reset(&mut self) {
        self.regions.fill(RegionSoundState::default());
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of regions currently sounding
    pub fn active_count(&self) -> usize {
        self.regions.iter().filter(|r| r.on).count()
    }

    /// All regions with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (RegionCoordinate, &RegionSoundState)> + '_ {
        self.layout.regions().zip(self.regions.iter())
    }

    /// Last recorded distances, one `Vec` per row
    pub fn distance_rows(&self) -> Vec<Vec<f64>> {
        self.regions
            .chunks(self.layout.columns())
            .map(|row| row.iter().map(|r| r.last_distance).collect())
            .collect()
    }
}
