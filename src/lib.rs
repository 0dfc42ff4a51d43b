//! Synesthesia - hear the shape of a room
//!
//! Turns depth camera frames into a wall of spatial tones. Each region of
//! the frame drives one virtual sound source: nearer surfaces sound higher,
//! and sources sit where their region is in the field of view.

pub mod capture;
pub mod config;
pub mod depth;
pub mod engine;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod render;

pub use config::SonifyConfig;
pub use depth::DepthBuffer;
pub use engine::{FrameOutput, FrameProcessor, RegionUpdate};
pub use error::{ConfigError, DepthError};
