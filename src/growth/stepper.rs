use glam::{Quat, Vec3};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::path::GrowthPath;
use crate::collision::RayCaster;
use crate::error::ConfigError;
use crate::math::{look_rotation, OrientedPoint};

/// Local probe directions in priority order: forward, down, backward, up
pub const PROBE_DIRECTIONS: [Vec3; 4] = [Vec3::Z, Vec3::NEG_Y, Vec3::NEG_Z, Vec3::Y];

/// Parameters controlling how a vine feels its way across the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Number of growth steps per path
    pub steps: usize,
    /// Distance covered by one step and reach of every probe ray
    pub step_length: f32,
    /// Lower bound of the random yaw per step (degrees)
    pub min_angle: f32,
    /// Upper bound of the random yaw per step (degrees)
    pub max_angle: f32,
    /// Height above the current point that probes start from
    pub probe_lift: f32,
    /// Fraction of a step the new point is pulled back from a hit surface
    pub surface_pullback: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            steps: 16,
            step_length: 0.5,
            min_angle: 5.0,
            max_angle: 30.0,
            probe_lift: 0.1,
            surface_pullback: 0.01,
        }
    }
}

impl GrowthParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(ConfigError::StepLength(self.step_length));
        }
        // The yaw is drawn from a range twice the spread wide
        let width = 2.0 * (self.max_angle - self.min_angle);
        if !width.is_finite() || self.min_angle > self.max_angle {
            return Err(ConfigError::AngleRange {
                min: self.min_angle,
                max: self.max_angle,
            });
        }
        Ok(())
    }
}

/// Derive an independent RNG seed for path `index` from the base seed
pub fn path_seed(base: u64, index: usize) -> u64 {
    // splitmix64 finalizer over the combined value
    let mut z = base.wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Advances an oriented point one step at a time, hugging whatever surface
/// the probes find.
///
/// Each stepper owns its random source, so paths grown with separately seeded
/// steppers never influence each other.
pub struct RayGrowthStepper<R: Rng = StdRng> {
    params: GrowthParams,
    rng: R,
}

impl RayGrowthStepper<StdRng> {
    pub fn seeded(params: GrowthParams, seed: u64) -> Result<Self, ConfigError> {
        Self::new(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RayGrowthStepper<R> {
    pub fn new(params: GrowthParams, rng: R) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params, rng })
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    /// Grow `params.steps` points from `seed`
    pub fn grow<C: RayCaster + ?Sized>(&mut self, seed: OrientedPoint, caster: &mut C) -> GrowthPath {
        let mut path = GrowthPath::with_capacity(seed, self.params.steps);
        let mut current = seed;
        for _ in 0..self.params.steps {
            let (next, hit) = self.advance(&current, caster);
            path.push(next, hit);
            current = next;
        }
        path
    }

    /// Next point after `current`
    pub fn step<C: RayCaster + ?Sized>(&mut self, current: &OrientedPoint, caster: &mut C) -> OrientedPoint {
        self.advance(current, caster).0
    }

    /// Returns the next point and whether it was placed against a surface
    fn advance<C: RayCaster + ?Sized>(&mut self, current: &OrientedPoint, caster: &mut C) -> (OrientedPoint, bool) {
        let step = self.params.step_length;
        let yaw = self.random_yaw();
        let turned = OrientedPoint {
            position: current.position,
            orientation: (current.orientation * Quat::from_rotation_y(yaw.to_radians())).normalize(),
        };
        let origin = turned.local_to_world_position(Vec3::Y * self.params.probe_lift);

        for (i, local) in PROBE_DIRECTIONS.iter().enumerate() {
            let direction = turned.local_to_world_vector(*local).normalize();
            if let Some(hit) = caster.cast(origin, direction, step) {
                let position = hit.point - direction * (step * self.params.surface_pullback);
                let orientation = look_rotation(hit.point - current.position, hit.normal);
                trace!("probe {} hit at {:?} (yaw {:.2})", i, hit.point, yaw);
                return (OrientedPoint { position, orientation }, true);
            }
        }

        trace!("no surface within {}, stepping into free space (yaw {:.2})", step, yaw);
        let position = turned.position + turned.forward() * step;
        (OrientedPoint { position, ..turned }, false)
    }

    /// Uniform in `[-(max-min), max-min]`, shifted by `min`
    fn random_yaw(&mut self) -> f32 {
        let spread = self.params.max_angle - self.params.min_angle;
        self.rng.gen_range(-spread..=spread) + self.params.min_angle
    }
}
