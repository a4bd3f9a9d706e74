use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::buffers::{MeshBuffers, SurfaceGroup, Vertex};
use super::tube::TubeParams;
use crate::error::ConfigError;
use crate::math::{BezierPath, HostTransform};

/// Corner UVs in emission order
const LEAF_UVS: [(f32, f32); 4] = [(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafParams {
    pub enabled: bool,
    /// Leaf width as a fraction of the distance between its attachment points
    pub size: f32,
}

impl Default for LeafParams {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 0.25,
        }
    }
}

impl LeafParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size.is_finite() && self.size >= 0.0) {
            return Err(ConfigError::LeafSize(self.size));
        }
        Ok(())
    }

    /// Leaf vertices for a path of `segments` Bezier segments
    pub fn vertex_count(&self, segments: usize) -> usize {
        if self.enabled {
            segments.saturating_sub(1) * 2 * 4
        } else {
            0
        }
    }

    pub fn index_count(&self, segments: usize) -> usize {
        if self.enabled {
            segments.saturating_sub(1) * 2 * 6
        } else {
            0
        }
    }
}

/// Emits a pair of flat quads on the tube's upper surface at each joint
/// except the last one
pub struct LeafQuadEmitter {
    params: LeafParams,
    tube: TubeParams,
    host: HostTransform,
}

impl LeafQuadEmitter {
    /// Leaves ride on the tube surface, so its parameters are checked too
    pub fn new(params: LeafParams, tube: TubeParams, host: HostTransform) -> Result<Self, ConfigError> {
        params.validate()?;
        tube.validate()?;
        host.validate()?;
        Ok(Self { params, tube, host })
    }

    pub fn emit(&self, path: &BezierPath, mesh: &mut MeshBuffers) {
        if !self.params.enabled {
            return;
        }

        let segments = path.num_segments();
        for i in 0..segments.saturating_sub(1) {
            for side in [-1.0, 1.0] {
                self.emit_quad(path, i, side, mesh);
            }
        }
    }

    fn emit_quad(&self, path: &BezierPath, segment: usize, side: f32, mesh: &mut MeshBuffers) {
        let n = path.num_segments() as f32;
        let f0 = path.frame(segment, 0.0);
        let f1 = path.frame(segment, 0.5);
        let r0 = self.tube.radius_at(segment as f32 / n);
        let r1 = self.tube.radius_at((segment as f32 + 0.5) / n);

        let o0 = f0.local_to_world_position(Vec3::Y * r0);
        let o1 = f1.local_to_world_position(Vec3::Y * r1);
        let x = o0.distance(o1) * self.params.size * side;

        let corners = [
            o0,
            o1,
            f1.local_to_world_position(Vec3::new(x, r1, 0.0)),
            f0.local_to_world_position(Vec3::new(x, r0, 0.0)),
        ];
        let normal = self.host.to_local_vector(f0.up()).normalize_or_zero();

        let start = mesh.add_vertices(corners.iter().zip(LEAF_UVS).map(|(corner, (u, v))| {
            Vertex::new(self.host.to_local_point(*corner), normal).with_uv(u, v)
        }));

        // Both windings face along the frame's up axis
        let order: [u32; 6] = if side > 0.0 {
            [0, 1, 2, 2, 3, 0]
        } else {
            [2, 1, 0, 0, 3, 2]
        };
        for tri in order.chunks(3) {
            mesh.add_triangle(SurfaceGroup::Leaf, start + tri[0], start + tri[1], start + tri[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{OrientedPoint, RadiusProfile};
    use glam::Quat;

    fn straight_path(anchors: usize) -> BezierPath {
        let points: Vec<_> = (0..anchors)
            .map(|i| OrientedPoint::new(Vec3::Z * i as f32, Quat::IDENTITY))
            .collect();
        BezierPath::from_anchors(&points).unwrap()
    }

    fn emit(path: &BezierPath, params: LeafParams) -> MeshBuffers {
        let tube = TubeParams {
            radius: 0.2,
            profile: RadiusProfile::constant(1.0),
            ..Default::default()
        };
        let mut mesh = MeshBuffers::new();
        LeafQuadEmitter::new(params, tube, HostTransform::default())
            .unwrap()
            .emit(path, &mut mesh);
        mesh
    }

    #[test]
    fn test_leaf_counts() {
        let path = straight_path(4);
        let params = LeafParams::default();
        let mesh = emit(&path, params);

        // Three segments, leaves on the first two joints, both sides
        assert_eq!(mesh.vertex_count(), 2 * 2 * 4);
        assert_eq!(mesh.leaf_indices.len(), 2 * 2 * 6);
        assert_eq!(mesh.vertex_count(), params.vertex_count(3));
        assert_eq!(mesh.leaf_indices.len(), params.index_count(3));
        assert!(mesh.tube_indices.is_empty());
        assert!(mesh.check_invariants().is_ok());
    }

    #[test]
    fn test_single_segment_has_no_leaves() {
        let mesh = emit(&straight_path(2), LeafParams::default());
        assert!(mesh.is_empty());
        assert!(mesh.leaf_indices.is_empty());
    }

    #[test]
    fn test_disabled_leaves() {
        let params = LeafParams { enabled: false, ..Default::default() };
        let mesh = emit(&straight_path(5), params);
        assert!(mesh.is_empty());
        assert_eq!(params.vertex_count(4), 0);
    }

    #[test]
    fn test_leaves_face_up() {
        let mesh = emit(&straight_path(3), LeafParams::default());
        for tri in mesh.leaf_indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
            let face = (b - a).cross(c - a);
            assert!(face.dot(Vec3::Y) > 0.0);
        }
        for normal in &mesh.normals {
            assert!((*normal - Vec3::Y).length() < 0.0001);
        }
    }

    #[test]
    fn test_leaf_geometry() {
        let params = LeafParams { enabled: true, size: 0.5 };
        let path = straight_path(3);
        let mesh = emit(&path, params);

        // First quad is the left side (side = -1)
        let quad = &mesh.positions[0..4];
        assert!((quad[0] - Vec3::new(0.0, 0.2, 0.0)).length() < 0.0001);
        let o1 = path.position(0, 0.5) + Vec3::Y * 0.2;
        assert!((quad[1] - o1).length() < 0.0001);

        let width = quad[0].distance(quad[1]) * 0.5;
        assert!((quad[2] - (o1 - Vec3::X * width)).length() < 0.0001);
        assert!((quad[3] - (quad[0] - Vec3::X * width)).length() < 0.0001);

        // Right side mirrors it
        let right = &mesh.positions[4..8];
        assert!((right[2] - (o1 + Vec3::X * width)).length() < 0.0001);
    }

    #[test]
    fn test_leaf_uvs() {
        let mesh = emit(&straight_path(3), LeafParams::default());
        let expected: Vec<_> = LEAF_UVS.iter().map(|&(u, v)| glam::Vec2::new(u, v)).collect();
        assert_eq!(&mesh.uvs[0..4], expected.as_slice());
        assert_eq!(&mesh.uvs[4..8], expected.as_slice());
    }

    #[test]
    fn test_validate_size() {
        let params = LeafParams { size: -0.1, ..Default::default() };
        assert_eq!(params.validate(), Err(ConfigError::LeafSize(-0.1)));
        assert!(LeafParams::default().validate().is_ok());
    }

    #[test]
    fn test_emitter_rejects_invalid_params() {
        let host = HostTransform::default();
        let huge = LeafParams { size: f32::INFINITY, ..Default::default() };
        assert!(matches!(
            LeafQuadEmitter::new(huge, TubeParams::default(), host),
            Err(ConfigError::LeafSize(_))
        ));

        let bad_tube = TubeParams { ring_segments: 0, ..Default::default() };
        assert_eq!(
            LeafQuadEmitter::new(LeafParams::default(), bad_tube, host).err(),
            Some(ConfigError::RingSegments(0))
        );
        assert!(LeafQuadEmitter::new(LeafParams::default(), TubeParams::default(), host).is_ok());
    }
}
