//! Mapping system for turning depth readings into audio parameters
//!
//! Scalar mappers, the geometry used to place sources around the
//! listener, and the threshold rules that decide when to emit.

mod geometry;
mod linear;
mod mapper;
mod threshold;

pub use geometry::{project_polar, round_to_tenths, signed_sqrt, RoundTenths, SignedSqrt};
pub use linear::{scale_linear, LinearMapper};
pub use mapper::{Mapper, MappingPipeline};
pub use threshold::{HysteresisGate, SoundThreshold};
