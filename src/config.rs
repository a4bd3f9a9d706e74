use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::animation::GrowCycle;
use crate::error::{ConfigError, Result};
use crate::growth::GrowthParams;
use crate::math::{look_rotation, HostTransform, OrientedPoint};
use crate::mesh::{LeafParams, TubeParams};

/// Where vines start and which way each one sets off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Number of evenly spaced azimuth seeds; ignored when `directions` is set
    pub count: usize,
    pub base_seed: u64,
    /// World-space start point; the host position when absent
    pub origin: Option<Vec3>,
    /// Explicit world-space seed directions
    pub directions: Vec<Vec3>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            count: 4,
            base_seed: 0,
            origin: None,
            directions: Vec::new(),
        }
    }
}

impl PathsConfig {
    pub fn path_count(&self) -> usize {
        if self.directions.is_empty() {
            self.count
        } else {
            self.directions.len()
        }
    }

    /// Initial heading of every path, in path order
    pub fn seed_directions(&self) -> Vec<Vec3> {
        if !self.directions.is_empty() {
            return self.directions.clone();
        }
        (0..self.count)
            .map(|m| {
                let theta = TAU * m as f32 / self.count as f32;
                Vec3::new(theta.cos(), 0.0, theta.sin())
            })
            .collect()
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.path_count() == 0 {
            return Err(ConfigError::NoPaths);
        }
        for (index, dir) in self.directions.iter().enumerate() {
            if !dir.is_finite() || dir.length_squared() == 0.0 {
                return Err(ConfigError::SeedDirection { index });
            }
        }
        Ok(())
    }
}

/// Complete generator configuration, loaded from one YAML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VineConfig {
    pub growth: GrowthParams,
    pub tube: TubeParams,
    pub leaves: LeafParams,
    pub paths: PathsConfig,
    pub host_transform: HostTransform,
    pub grow_cycle: GrowCycle,
}

impl VineConfig {
    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        let config: VineConfig = if yaml.trim().is_empty() {
            VineConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.growth.validate()?;
        self.tube.validate()?;
        self.leaves.validate()?;
        self.paths.validate()?;
        self.host_transform.validate()?;
        self.grow_cycle.validate()
    }

    pub fn origin(&self) -> Vec3 {
        self.paths.origin.unwrap_or(self.host_transform.position)
    }

    /// Starting oriented point of every path
    pub fn seeds(&self) -> Vec<OrientedPoint> {
        let origin = self.origin();
        self.paths
            .seed_directions()
            .into_iter()
            .map(|dir| OrientedPoint {
                position: origin,
                orientation: seed_rotation(dir),
            })
            .collect()
    }
}

fn seed_rotation(direction: Vec3) -> Quat {
    look_rotation(direction, Vec3::Y)
}
