//! Region sampling strategies
//!
//! A sampler reduces the pixels of one grid region to a single raw
//! intensity. Coordinates are clamped into the buffer, so a grid that does
//! not divide the frame evenly never reads outside it.

use super::DepthBuffer;
use crate::error::DepthError;
use crate::grid::{GridLayout, RegionCoordinate};
use serde::{Deserialize, Serialize};

/// Trait for region samplers
pub trait RegionSampler: Send + Sync {
    /// Get the name of this sampler
    fn name(&self) -> &str;

    /// Raw intensity representing `region` of `buffer`
    fn sample(
        &self,
        buffer: &DepthBuffer,
        region: RegionCoordinate,
        layout: &GridLayout,
    ) -> Result<f64, DepthError>;
}

/// Available sampling strategies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    /// Single pixel at the region center
    Center,
    /// Mean over the inner half of the region
    #[default]
    Average,
}

impl SamplerKind {
    /// Build the sampler, reading intensity at `channel` within each pixel
    pub fn build(self, channel: usize) -> Box<dyn RegionSampler> {
        match self {
            SamplerKind::Center => Box::new(CenterSampler::new(channel)),
            SamplerKind::Average => Box::new(AverageSampler::new(channel)),
        }
    }
}

/// Pixel geometry of one region within a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegionBox {
    center_x: usize,
    center_y: usize,
    width: usize,
    height: usize,
}

impl RegionBox {
    fn locate(
        buffer: &DepthBuffer,
        region: RegionCoordinate,
        layout: &GridLayout,
    ) -> Result<Self, DepthError> {
        let (columns, rows) = (layout.columns(), layout.rows());
        if buffer.width() < columns || buffer.height() < rows {
            return Err(DepthError::TooSmallForGrid {
                width: buffer.width(),
                height: buffer.height(),
                columns,
                rows,
            });
        }

        let width = buffer.width() / columns;
        let height = buffer.height() / rows;
        let center_x = region.column * buffer.width() / columns + width / 2;
        let center_y = region.row * buffer.height() / rows + height / 2;

        Ok(Self {
            center_x: center_x.min(buffer.width() - 1),
            center_y: center_y.min(buffer.height() - 1),
            width,
            height,
        })
    }
}

/// Reads the single pixel at the center of the region
#[derive(Debug, Clone)]
pub struct CenterSampler {
    channel: usize,
}

impl CenterSampler {
    pub fn new(channel: usize) -> Self {
        Self { channel }
    }
}

impl RegionSampler for CenterSampler {
    fn name(&self) -> &str {
        "center"
    }

    fn sample(
        &self,
        buffer: &DepthBuffer,
        region: RegionCoordinate,
        layout: &GridLayout,
    ) -> Result<f64, DepthError> {
        buffer.check_channel(self.channel)?;
        let bounds = RegionBox::locate(buffer, region, layout)?;
        read(buffer, bounds.center_x, bounds.center_y, self.channel)
    }
}

/// Averages the inner half of the region around its center
///
/// The window spans a quarter of the region width on each side of the
/// center, and likewise vertically. Regions too small to hold a window
/// fall back to the center pixel.
#[derive(Debug, Clone)]
pub struct AverageSampler {
    channel: usize,
}

impl AverageSampler {
    pub fn new(channel: usize) -> Self {
        Self { channel }
    }
}

impl RegionSampler for AverageSampler {
    fn name(&self) -> &str {
        "average"
    }

    fn sample(
        &self,
        buffer: &DepthBuffer,
        region: RegionCoordinate,
        layout: &GridLayout,
    ) -> Result<f64, DepthError> {
        buffer.check_channel(self.channel)?;
        let bounds = RegionBox::locate(buffer, region, layout)?;

        let reach_x = bounds.width / 4;
        let reach_y = bounds.height / 4;
        let xs = bounds.center_x.saturating_sub(reach_x)..bounds.center_x + reach_x;
        let ys = bounds.center_y.saturating_sub(reach_y)..bounds.center_y + reach_y;

        if xs.is_empty() || ys.is_empty() {
            return read(buffer, bounds.center_x, bounds.center_y, self.channel);
        }

        let mut total = 0.0;
        let mut count = 0usize;
        for y in ys {
            for x in xs.clone() {
                total += read(buffer, x, y, self.channel)?;
                count += 1;
            }
        }

        Ok(total / count as f64)
    }
}

fn read(buffer: &DepthBuffer, x: usize, y: usize, channel: usize) -> Result<f64, DepthError> {
    buffer
        .intensity(x, y, channel)
        .map(f64::from)
        .ok_or(DepthError::InvalidChannel {
            offset: channel,
            bytes_per_pixel: buffer.bytes_per_pixel(),
        })
}
