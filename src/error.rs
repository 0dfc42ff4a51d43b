//! Error types for the sonification pipeline

use thiserror::Error;

/// Problems with the pipeline configuration.
///
/// These are raised while building the pipeline and never while
/// processing frames.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{axis} angle table has {actual} entries but the grid has {expected}")]
    AngleTableMismatch {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("range '{name}' is degenerate (min == max == {min})")]
    DegenerateRange { name: &'static str, min: f64 },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("depth frames of {width}x{height} cannot cover a {columns}x{rows} grid")]
    BufferSmallerThanGrid {
        width: usize,
        height: usize,
        columns: usize,
        rows: usize,
    },

    #[error("invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Problems with an individual depth buffer.
#[derive(Debug, Error, PartialEq)]
pub enum DepthError {
    #[error("depth buffer is empty")]
    Empty,

    #[error("depth buffer holds {actual} bytes, expected at least {expected}")]
    Truncated { expected: usize, actual: usize },

    #[error("row stride of {stride} bytes is shorter than a row of {row_bytes} bytes")]
    StrideTooSmall { stride: usize, row_bytes: usize },

    #[error("channel offset {offset} is outside a {bytes_per_pixel}-byte pixel")]
    InvalidChannel { offset: usize, bytes_per_pixel: usize },

    #[error("{width}x{height} buffer is smaller than the {columns}x{rows} grid")]
    TooSmallForGrid {
        width: usize,
        height: usize,
        columns: usize,
        rows: usize,
    },
}
