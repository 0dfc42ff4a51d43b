//! Audio renderer side of the pipeline
//!
//! Renderers consume [`RegionUpdate`]s after each frame. Turning the
//! parameters into sound is left to the audio backend; the renderers here
//! track per-region voice state or forward the stream to another process.

mod json;
mod voices;

pub use json::JsonLinesRenderer;
pub use voices::{RegionVoice, VoiceBank};

use crate::engine::RegionUpdate;
use anyhow::Result;

/// Trait for update consumers
pub trait Renderer: Send {
    /// Apply the updates of one frame, in order
    fn apply(&mut self, updates: &[RegionUpdate]) -> Result<()>;
}
