//! Per-region voice state held by the renderer

use super::Renderer;
use crate::engine::RegionUpdate;
use crate::grid::{GridLayout, Position, RegionCoordinate};
use anyhow::{bail, Result};
use tracing::debug;

/// One oscillator and its panner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionVoice {
    pub frequency: f64,
    pub amplitude: f64,
    pub position: Position,
}

impl RegionVoice {
    pub fn is_active(&self) -> bool {
        self.amplitude > 0.0
    }
}

/// The wall of voices, one per region, stored row-major
pub struct VoiceBank {
    layout: GridLayout,
    amplitude: f64,
    voices: Vec<RegionVoice>,
}

impl VoiceBank {
    /// Create a silent bank; sounding voices play at `amplitude`
    pub fn new(layout: &GridLayout, amplitude: f64) -> Self {
        Self {
            layout: layout.clone(),
            amplitude,
            voices: vec![RegionVoice::default(); layout.len()],
        }
    }

    pub fn voice(&self, column: usize, row: usize) -> Option<&RegionVoice> {
        let region = RegionCoordinate::new(column, row);
        if !self.layout.contains(region) {
            return None;
        }
        self.voices.get(self.layout.index_of(region))
    }

    /// Number of voices currently sounding
    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }
}

impl Renderer for VoiceBank {
    fn apply(&mut self, updates: &[RegionUpdate]) -> Result<()> {
        for update in updates {
            let region = update.region;
            if !self.layout.contains(region) {
                bail!("update for region {} outside the voice bank", region);
            }
            let index = self.layout.index_of(region);
            let Some(voice) = self.voices.get_mut(index) else {
                bail!("update for region {} outside the voice bank", region);
            };

            if update.on {
                if let Some(frequency) = update.frequency_hz {
                    voice.frequency = frequency;
                }
                if let Some(position) = update.position {
                    voice.position = position;
                }
                voice.amplitude = self.amplitude;
            } else {
                voice.amplitude = 0.0;
            }
            debug!(%region, on = update.on, frequency = voice.frequency, "voice updated");
        }
        Ok(())
    }
}
