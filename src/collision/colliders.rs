use glam::Vec3;
use serde::{Deserialize, Serialize};
use super::{RayCaster, RayHit};

/// Infinite plane through `point`, facing `normal`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    /// Horizontal ground at height `y`
    pub fn ground(y: f32) -> Self {
        Self::new(Vec3::new(0.0, y, 0.0), Vec3::Y)
    }

    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let denom = self.normal.dot(direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.point - origin).dot(self.normal) / denom;
        (t >= 0.0).then_some(t)
    }
}

/// Solid sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Nearest non-negative ray distance to the surface
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let oc = origin - self.center;

        let a = direction.dot(direction);
        let b = 2.0 * oc.dot(direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = (-b - sqrt_d) / (2.0 * a);
        if near >= 0.0 {
            return Some(near);
        }
        let far = (-b + sqrt_d) / (2.0 * a);
        (far >= 0.0).then_some(far)
    }
}

/// Analytic scene made of planes and spheres; reports the closest hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colliders {
    pub planes: Vec<Plane>,
    pub spheres: Vec<Sphere>,
}

impl Colliders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.planes.push(plane);
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty() && self.spheres.is_empty()
    }

    pub fn closest_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let mut closest: Option<(f32, Vec3)> = None;
        let mut consider = |distance: f32, normal: Vec3| {
            if distance <= max_distance && closest.map_or(true, |(d, _)| distance < d) {
                closest = Some((distance, normal));
            }
        };

        for plane in &self.planes {
            if let Some(d) = plane.intersect(origin, direction) {
                // Report the side the ray arrives from
                let normal = if plane.normal.dot(direction) > 0.0 {
                    -plane.normal
                } else {
                    plane.normal
                };
                consider(d, normal);
            }
        }

        for sphere in &self.spheres {
            if let Some(d) = sphere.intersect(origin, direction) {
                let point = origin + direction * d;
                consider(d, (point - sphere.center).normalize_or_zero());
            }
        }

        closest.map(|(d, normal)| RayHit::new(origin + direction * d, normal))
    }
}

impl RayCaster for Colliders {
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.closest_hit(origin, direction, max_distance)
    }
}

impl RayCaster for Plane {
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        Colliders::new().with_plane(*self).closest_hit(origin, direction, max_distance)
    }
}

impl RayCaster for Sphere {
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        Colliders::new().with_sphere(*self).closest_hit(origin, direction, max_distance)
    }
}
