use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::buffers::{MeshBuffers, SurfaceGroup, Vertex};
use crate::error::ConfigError;
use crate::math::{ArcLengthTable, BezierPath, HostTransform, RadiusProfile};

/// Parameters for the tube surface swept along each spline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeParams {
    /// Vertices around each ring (one extra closes the UV seam)
    pub ring_segments: usize,
    /// Rings per Bezier segment
    pub curve_segments: usize,
    /// Base radius before the profile multiplier
    pub radius: f32,
    /// Radius multiplier along the whole path
    pub profile: RadiusProfile,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            ring_segments: 16,
            curve_segments: 16,
            radius: 0.1,
            profile: RadiusProfile::default(),
        }
    }
}

impl TubeParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_segments < 3 {
            return Err(ConfigError::RingSegments(self.ring_segments));
        }
        if self.curve_segments < 2 {
            return Err(ConfigError::CurveSegments(self.curve_segments));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(ConfigError::Radius(self.radius));
        }
        self.profile.validate()
    }

    /// Radius at normalized path position `x`
    pub fn radius_at(&self, x: f32) -> f32 {
        self.radius * self.profile.evaluate(x)
    }

    pub fn vertex_count(&self, segments: usize) -> usize {
        segments * self.curve_segments * (self.ring_segments + 1)
    }

    pub fn index_count(&self, segments: usize) -> usize {
        segments * (self.curve_segments - 1) * self.ring_segments * 6
    }
}

/// Sweeps rings of vertices along a [`BezierPath`] and stitches them into
/// the tube surface group.
pub struct TubeMeshSynthesizer {
    params: TubeParams,
    host: HostTransform,
}

impl TubeMeshSynthesizer {
    pub fn new(params: TubeParams, host: HostTransform) -> Result<Self, ConfigError> {
        params.validate()?;
        host.validate()?;
        Ok(Self { params, host })
    }

    pub fn params(&self) -> &TubeParams {
        &self.params
    }

    /// Append the tube for `path` to `mesh`; indices start at the mesh's
    /// current vertex count
    pub fn synthesize(&self, path: &BezierPath, mesh: &mut MeshBuffers) {
        let segments = path.num_segments();
        let rings = self.params.curve_segments;
        let ring_len = self.params.ring_segments + 1;
        let base = mesh.vertex_count() as u32;

        for segment in 0..segments {
            let arc = ArcLengthTable::for_segment(path, segment);
            for j in 0..rings {
                let t = j as f32 / (rings - 1) as f32;
                self.emit_ring(path, segment, t, &arc, mesh);
            }
        }

        for segment in 0..segments {
            for j in 0..rings - 1 {
                let root = base + (ring_len * (j + rings * segment)) as u32;
                self.link_rings(root, ring_len as u32, mesh);
            }
        }
    }

    fn emit_ring(&self, path: &BezierPath, segment: usize, t: f32, arc: &ArcLengthTable, mesh: &mut MeshBuffers) {
        let r = self.params.ring_segments;
        let frame = path.frame(segment, t);
        let global = (segment as f32 + t) / path.num_segments() as f32;
        let radius = self.params.radius_at(global);
        let v = arc.sample(t);

        for k in 0..=r {
            let angle = TAU * (k % r) as f32 / r as f32;
            let radial = frame.local_to_world_vector(Quat::from_rotation_z(angle) * Vec3::X);
            let position = self.host.to_local_point(frame.position + radial * radius);
            let normal = self.host.to_local_vector(radial).normalize_or_zero();
            mesh.add_vertex(Vertex::new(position, normal).with_uv(k as f32 / r as f32, v));
        }
    }

    /// Two triangles per quad between the ring at `root` and the next one
    fn link_rings(&self, root: u32, ring_len: u32, mesh: &mut MeshBuffers) {
        for k in 0..self.params.ring_segments as u32 {
            let current_a = root + k;
            let current_b = current_a + 1;
            let next_a = current_a + ring_len;
            let next_b = current_b + ring_len;

            mesh.add_triangle(SurfaceGroup::Tube, next_a, current_a, current_b);
            mesh.add_triangle(SurfaceGroup::Tube, next_b, next_a, current_b);
        }
    }
}
