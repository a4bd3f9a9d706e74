use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// World placement of the object that owns the generated mesh.
///
/// Growth happens in world space; vertices are stored relative to this
/// transform so the mesh can be attached to the host object unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for HostTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl HostTransform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    /// World-space point expressed in the host's local space
    pub fn to_local_point(&self, world: Vec3) -> Vec3 {
        (self.rotation.inverse() * (world - self.position)) / self.scale
    }

    /// World-space direction with the host rotation removed; scale is not applied
    pub fn to_local_vector(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * world
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = self.scale;
        if s.cmpeq(Vec3::ZERO).any() || !s.is_finite() {
            return Err(ConfigError::HostScale(s.to_array()));
        }
        Ok(())
    }
}
