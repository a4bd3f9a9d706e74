//! Ray-intersection seam between the growth stepper and the host scene
//!
//! The generator never owns a physics world; it only asks a [`RayCaster`]
//! whether a short probe ray hits anything.

pub mod colliders;

pub use colliders::{Colliders, Plane, Sphere};

use glam::Vec3;
use log::warn;

/// Surface point and normal reported by a ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
}

impl RayHit {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }
}

/// Synchronous ray-intersection query.
///
/// `direction` is unit length; hits farther than `max_distance` from `origin`
/// must be reported as `None`.
pub trait RayCaster {
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<F> RayCaster for F
where
    F: FnMut(Vec3, Vec3, f32) -> Option<RayHit>,
{
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self(origin, direction, max_distance)
    }
}

/// Empty scene: every probe misses, so growth always takes the free-space step
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollision;

impl RayCaster for NoCollision {
    fn cast(&mut self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

/// Adapts a fallible ray query.
///
/// The first error is kept and every later query misses without calling the
/// inner function; [`TryCaster::finish`] then reports the error so the caller
/// can discard whatever was generated.
pub struct TryCaster<F> {
    query: F,
    error: Option<String>,
    calls: usize,
}

impl<F> TryCaster<F>
where
    F: FnMut(Vec3, Vec3, f32) -> Result<Option<RayHit>, String>,
{
    pub fn new(query: F) -> Self {
        Self {
            query,
            error: None,
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `value` unless a query failed along the way
    pub fn finish<T>(self, value: T) -> Result<T, String> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }
}

impl<F> RayCaster for TryCaster<F>
where
    F: FnMut(Vec3, Vec3, f32) -> Result<Option<RayHit>, String>,
{
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        if self.error.is_some() {
            return None;
        }
        self.calls += 1;
        match (self.query)(origin, direction, max_distance) {
            Ok(hit) => hit,
            Err(error) => {
                warn!("ray query failed after {} calls: {}", self.calls, error);
                self.error = Some(error);
                None
            }
        }
    }
}
