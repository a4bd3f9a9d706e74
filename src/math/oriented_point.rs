use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Below this |sin| between forward and up the pair is treated as parallel
const PARALLEL_EPSILON: f32 = 1e-4;

/// A position with a local coordinate frame.
///
/// Local axes follow the growth convention: +X right, +Y up, +Z forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedPoint {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for OrientedPoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl OrientedPoint {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Frame looking along `forward` with `up` as the reference up axis
    pub fn looking(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        Self {
            position,
            orientation: look_rotation(forward, up),
        }
    }

    pub fn local_to_world_position(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    pub fn local_to_world_vector(&self, local: Vec3) -> Vec3 {
        self.orientation * local
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }
}

/// Rotation whose +Z axis points along `forward` and whose +Y axis lies in the
/// plane spanned by `forward` and `up`.
///
/// A zero `forward` yields the rotation that maps +Y onto `up` (or identity if
/// `up` is zero too). When `up` is parallel to `forward` the world axis least
/// aligned with `forward` is used as up instead, so the frame never flips to NaN.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(forward) = forward.try_normalize() else {
        return match up.try_normalize() {
            Some(up) => Quat::from_rotation_arc(Vec3::Y, up),
            None => Quat::IDENTITY,
        };
    };

    let up = match up.try_normalize() {
        Some(up) if up.cross(forward).length() > PARALLEL_EPSILON => up,
        _ => fallback_up(forward),
    };

    let right = up.cross(forward).normalize();
    let true_up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, forward)).normalize()
}

/// Spherical interpolation between two directions, returned at unit length.
///
/// Opposite directions rotate about an arbitrary perpendicular axis; no clamping
/// of large angles is applied.
pub fn slerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let (Some(from), Some(to)) = (from.try_normalize(), to.try_normalize()) else {
        return from.lerp(to, t).normalize_or_zero();
    };
    let arc = Quat::from_rotation_arc(from, to);
    (Quat::IDENTITY.slerp(arc, t) * from).normalize()
}

fn fallback_up(forward: Vec3) -> Vec3 {
    if forward.y.abs() < 0.9 {
        Vec3::Y
    } else if forward.z.abs() < 0.9 {
        Vec3::Z
    } else {
        Vec3::X
    }
}
