use glam::Vec3;

use super::buffers::{bounding_sphere, MeshBuffers};
use super::leaf::{LeafParams, LeafQuadEmitter};
use super::tube::{TubeMeshSynthesizer, TubeParams};
use crate::error::ConfigError;
use crate::growth::GrowthPath;
use crate::math::{BezierPath, HostTransform};

/// Per-path slice of the merged mesh
#[derive(Debug, Clone, PartialEq)]
pub struct PathMeshInfo {
    pub path_index: usize,
    pub vertex_start: u32,
    pub vertex_count: u32,
    pub tube_index_start: u32,
    pub tube_index_count: u32,
    pub leaf_index_start: u32,
    pub leaf_index_count: u32,
    pub segments: usize,
    /// Growth steps that landed on a surface
    pub growth_hits: usize,
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
}

/// Builds tube and leaf geometry for one path at a time into a shared mesh
pub struct MeshGenerator {
    tube: TubeMeshSynthesizer,
    leaves: LeafQuadEmitter,
}

impl MeshGenerator {
    pub fn new(tube: TubeParams, leaves: LeafParams, host: HostTransform) -> Result<Self, ConfigError> {
        Ok(Self {
            leaves: LeafQuadEmitter::new(leaves, tube.clone(), host)?,
            tube: TubeMeshSynthesizer::new(tube, host)?,
        })
    }

    /// Tube then leaves for `path`, appended to `mesh`
    pub fn generate_path(&self, path: &BezierPath, mesh: &mut MeshBuffers) {
        self.tube.synthesize(path, mesh);
        self.leaves.emit(path, mesh);
    }

    /// Fit a spline to `growth`, mesh it, and report where it landed in `mesh`
    pub fn generate_tracked(
        &self,
        path_index: usize,
        growth: &GrowthPath,
        mesh: &mut MeshBuffers,
    ) -> Result<PathMeshInfo, ConfigError> {
        let spline = growth.to_bezier()?;

        let vertex_start = mesh.vertex_count() as u32;
        let tube_index_start = mesh.tube_indices.len() as u32;
        let leaf_index_start = mesh.leaf_indices.len() as u32;

        self.generate_path(&spline, mesh);

        let (bounds_center, bounds_radius) = bounding_sphere(&mesh.positions[vertex_start as usize..]);

        Ok(PathMeshInfo {
            path_index,
            vertex_start,
            vertex_count: mesh.vertex_count() as u32 - vertex_start,
            tube_index_start,
            tube_index_count: mesh.tube_indices.len() as u32 - tube_index_start,
            leaf_index_start,
            leaf_index_count: mesh.leaf_indices.len() as u32 - leaf_index_start,
            segments: spline.num_segments(),
            growth_hits: growth.hits(),
            bounds_center,
            bounds_radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{OrientedPoint, RadiusProfile};
    use glam::Quat;

    fn growth(steps: usize) -> GrowthPath {
        let mut path = GrowthPath::new(OrientedPoint::default());
        for i in 1..=steps {
            path.push(OrientedPoint::new(Vec3::new(0.0, 0.0, i as f32), Quat::IDENTITY), i % 2 == 0);
        }
        path
    }

    fn generator() -> MeshGenerator {
        let tube = TubeParams {
            ring_segments: 6,
            curve_segments: 4,
            radius: 0.1,
            profile: RadiusProfile::constant(1.0),
        };
        MeshGenerator::new(tube, LeafParams::default(), HostTransform::default()).unwrap()
    }

    #[test]
    fn test_generate_single_path() {
        let mut mesh = MeshBuffers::new();
        let info = generator().generate_tracked(0, &growth(3), &mut mesh).unwrap();

        assert_eq!(info.segments, 3);
        assert_eq!(info.vertex_start, 0);
        assert_eq!(info.vertex_count as usize, 3 * 4 * 7 + 2 * 2 * 4);
        assert_eq!(info.tube_index_count as usize, 3 * 3 * 6 * 6);
        assert_eq!(info.leaf_index_count as usize, 2 * 2 * 6);
        assert_eq!(info.growth_hits, 1);
        assert!(mesh.check_invariants().is_ok());
    }

    #[test]
    fn test_tracked_ranges_follow_previous_path() {
        let generator = generator();
        let mut mesh = MeshBuffers::new();
        let first = generator.generate_tracked(0, &growth(2), &mut mesh).unwrap();
        let second = generator.generate_tracked(1, &growth(3), &mut mesh).unwrap();

        assert_eq!(second.path_index, 1);
        assert_eq!(second.vertex_start, first.vertex_count);
        assert_eq!(second.tube_index_start, first.tube_index_count);
        assert_eq!(second.leaf_index_start, first.leaf_index_count);

        let tube = &mesh.tube_indices[second.tube_index_start as usize..];
        assert!(tube.iter().all(|&i| i >= second.vertex_start));
        assert!(mesh.check_invariants().is_ok());
    }

    #[test]
    fn test_path_bounds() {
        let mut mesh = MeshBuffers::new();
        let info = generator().generate_tracked(0, &growth(4), &mut mesh).unwrap();
        // Leaves sit on the first joints, pulling the centroid back a little
        assert!((info.bounds_center.z - 2.0).abs() < 0.5);
        assert!(info.bounds_radius >= 2.0);
    }

    #[test]
    fn test_seed_only_path() {
        let mut mesh = MeshBuffers::new();
        let info = generator().generate_tracked(0, &growth(0), &mut mesh).unwrap();
        assert_eq!(info.segments, 1);
        assert_eq!(info.leaf_index_count, 0);
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
    }
}
