//! Records emitted by the frame processor

use crate::grid::{Position, RegionCoordinate};
use serde::Serialize;

/// New audio parameters for one region
///
/// A muted update carries neither frequency nor position; the renderer
/// silences the source and leaves it where it was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionUpdate {
    pub region: RegionCoordinate,
    pub on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl RegionUpdate {
    pub fn mute(region: RegionCoordinate) -> Self {
        Self {
            region,
            on: false,
            frequency_hz: None,
            position: None,
        }
    }

    pub fn unmute(region: RegionCoordinate, frequency_hz: f64, position: Position) -> Self {
        Self {
            region,
            on: true,
            frequency_hz: Some(frequency_hz),
            position: Some(position),
        }
    }
}

/// Everything produced by one pass over a depth frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Updates in row-major region order
    pub updates: Vec<RegionUpdate>,

    /// Diagnostic line for the center region, when it changed
    pub status: Option<String>,

    /// Regions that could not be evaluated
    pub skipped: usize,
}

impl FrameOutput {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_serializes_without_parameters() {
        let update = RegionUpdate::mute(RegionCoordinate::new(2, 1));
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"region":{"column":2,"row":1},"on":false}"#);
    }

    #[test]
    fn test_unmute_serializes_parameters() {
        let update = RegionUpdate::unmute(
            RegionCoordinate::new(0, 0),
            300.0,
            Position::new(-1.5, 1.5, 0.1),
        );
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(
            json,
            r#"{"region":{"column":0,"row":0},"on":true,"frequency_hz":300.0,"position":{"x":-1.5,"y":1.5,"z":0.1}}"#
        );
    }
}
