//! Reference layout used to check speaker placement at startup

use crate::grid::{GridLayout, Position, RegionCoordinate};
use crate::mapping::{project_polar, round_to_tenths};

/// Position of every region's source at a fixed distance, row-major
pub fn reference_positions(layout: &GridLayout, distance: f64) -> Vec<(RegionCoordinate, Position)> {
    layout
        .regions()
        .map(|region| {
            let (column_angle, row_angle) = layout.angles_for(region);
            let (x, z) = project_polar(distance, column_angle);
            let (y, _) = project_polar(distance, row_angle);
            let position = Position::new(round_to_tenths(x), round_to_tenths(y), round_to_tenths(z));
            (region, position)
        })
        .collect()
}
