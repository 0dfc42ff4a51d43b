//! Frame source trait and DepthFrame definition

use crate::depth::DepthBuffer;
use std::time::Instant;
use tokio::sync::broadcast;

/// The depth half of one synchronized capture
#[derive(Debug, Clone)]
pub struct DepthFrame {
    /// Position in capture order, strictly increasing per source
    pub sequence: u64,

    /// When this frame was captured
    pub captured_at: Instant,

    pub depth: DepthBuffer,
}

impl DepthFrame {
    /// Create a new frame captured now
    pub fn new(sequence: u64, depth: DepthBuffer) -> Self {
        Self {
            sequence,
            captured_at: Instant::now(),
            depth,
        }
    }
}

/// Trait for depth frame sources
pub trait FrameSource: Send {
    /// Get the name of this source
    fn name(&self) -> &str;

    /// Start delivering frames
    fn start(&mut self) -> anyhow::Result<()>;

    /// Stop delivering frames
    fn stop(&mut self);

    /// Check if the source is still delivering
    fn is_running(&self) -> bool;

    /// Subscribe to frames from this source
    fn subscribe(&self) -> broadcast::Receiver<DepthFrame>;
}
