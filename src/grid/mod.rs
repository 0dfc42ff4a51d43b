//! Logical region grid laid over each depth frame
//!
//! Every region maps to one virtual sound source. The layout pairs the
//! grid dimensions with the angle tables that place each column and row
//! around the listener.

mod state;

pub use state::{Position, RegionSoundState, SoundGrid};

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;

/// Stock column angles in degrees, left to right
pub const DEFAULT_COLUMN_ANGLES: [f64; 5] = [-85.0, -40.0, 0.0, 40.0, 85.0];

/// Stock row angles in degrees, top to bottom
pub const DEFAULT_ROW_ANGLES: [f64; 3] = [85.0, 0.0, -85.0];

/// A cell of the region grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegionCoordinate {
    pub column: usize,
    pub row: usize,
}

impl RegionCoordinate {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for RegionCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.column, self.row)
    }
}

/// Per-axis source angles, one entry per column and one per row
#[derive(Debug, Clone, PartialEq)]
pub struct AngleTable {
    columns: Vec<f64>,
    rows: Vec<f64>,
}

impl AngleTable {
    pub fn new(columns: Vec<f64>, rows: Vec<f64>) -> Self {
        Self { columns, rows }
    }

    pub fn column(&self, column: usize) -> f64 {
        self.columns[column]
    }

    pub fn row(&self, row: usize) -> f64 {
        self.rows[row]
    }
}

impl Default for AngleTable {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_ANGLES.to_vec(), DEFAULT_ROW_ANGLES.to_vec())
    }
}

/// Grid dimensions together with a matching angle table
///
/// The only way to build one is through [`GridLayout::new`], which rejects
/// angle tables whose lengths disagree with the dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    rows: usize,
    columns: usize,
    angles: AngleTable,
}

impl GridLayout {
    pub fn new(rows: usize, columns: usize, angles: AngleTable) -> Result<Self, ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if angles.columns.len() != columns {
            return Err(ConfigError::AngleTableMismatch {
                axis: "column",
                expected: columns,
                actual: angles.columns.len(),
            });
        }
        if angles.rows.len() != rows {
            return Err(ConfigError::AngleTableMismatch {
                axis: "row",
                expected: rows,
                actual: angles.rows.len(),
            });
        }
        if angles.columns.iter().chain(&angles.rows).any(|a| !a.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "grid angles",
                reason: "angles must be finite".to_string(),
            });
        }

        Ok(Self { rows, columns, angles })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn angles(&self) -> &AngleTable {
        &self.angles
    }

    /// `(column_angle, row_angle)` for a region
    pub fn angles_for(&self, region: RegionCoordinate) -> (f64, f64) {
        (self.angles.column(region.column), self.angles.row(region.row))
    }

    /// Region used for the diagnostic status line
    pub fn center(&self) -> RegionCoordinate {
        RegionCoordinate::new(self.columns / 2, self.rows / 2)
    }

    pub fn contains(&self, region: RegionCoordinate) -> bool {
        region.column < self.columns && region.row < self.rows
    }

    /// Row-major index of a region
    pub fn index_of(&self, region: RegionCoordinate) -> usize {
        region.row * self.columns + region.column
    }

    /// All regions in row-major order
    pub fn regions(&self) -> impl Iterator<Item = RegionCoordinate> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| RegionCoordinate::new(column, row))
        })
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROW_ANGLES.len(),
            columns: DEFAULT_COLUMN_ANGLES.len(),
            angles: AngleTable::default(),
        }
    }
}
