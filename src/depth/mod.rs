//! Depth frame input: buffers, region sampling and calibration

mod buffer;
mod normalizer;
mod sampler;

pub use buffer::DepthBuffer;
pub use normalizer::DistanceNormalizer;
pub use sampler::{AverageSampler, CenterSampler, RegionSampler, SamplerKind};
