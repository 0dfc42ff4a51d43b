//! Depth frame intake
//!
//! Sources deliver [`DepthFrame`]s in capture order; the [`CaptureAdapter`]
//! feeds them one at a time to the frame processor.

mod adapter;
mod sequence;
mod source;
mod synthetic;

pub use adapter::{CaptureAdapter, FrameReport};
pub use sequence::{list_frames, load_frame, ImageSequenceSource, SequenceConfig};
pub use source::{DepthFrame, FrameSource};
pub use synthetic::{SyntheticScene, SyntheticSource};
