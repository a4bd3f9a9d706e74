pub mod arc_length;
pub mod bezier;
pub mod oriented_point;
pub mod profile;
pub mod transform;

pub use arc_length::{ArcLengthTable, ARC_LENGTH_SAMPLES};
pub use bezier::{derive_handles, evaluate_cubic, BezierPath};
pub use oriented_point::{look_rotation, slerp_direction, OrientedPoint};
pub use profile::{Easing, Keyframe, RadiusProfile};
pub use transform::HostTransform;
