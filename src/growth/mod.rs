//! Collision-guided growth of oriented point sequences

pub mod path;
pub mod stepper;

pub use path::GrowthPath;
pub use stepper::{path_seed, GrowthParams, RayGrowthStepper, PROBE_DIRECTIONS};
