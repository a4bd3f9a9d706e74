use glam::{Vec2, Vec3};
use thiserror::Error;

/// Floats per interleaved vertex: position(3) + normal(3) + uv(2)
pub const VERTEX_STRIDE: usize = 8;

/// A vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: Vec2::ZERO,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Vec2::new(u, v);
        self
    }

    /// Layout: position(3) + normal(3) + uv(2)
    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv.x, self.uv.y,
        ]
    }
}

/// Which index list a triangle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceGroup {
    Tube,
    Leaf,
}

/// Broken buffer consistency found by [`MeshBuffers::check_invariants`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshInvariantError {
    #[error("attribute lengths differ: {positions} positions, {normals} normals, {uvs} uvs")]
    LengthMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    #[error("{group:?} index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        group: SurfaceGroup,
        index: u32,
        vertex_count: usize,
    },

    #[error("{group:?} index count {len} is not a multiple of 3")]
    PartialTriangle { group: SurfaceGroup, len: usize },
}

/// Parallel vertex attributes plus one triangle list per surface group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub tube_indices: Vec<u32>,
    pub leaf_indices: Vec<u32>,
    /// Bounding sphere, valid after [`MeshBuffers::calculate_bounds`]
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, tube_indices: usize, leaf_indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            tube_indices: Vec::with_capacity(tube_indices),
            leaf_indices: Vec::with_capacity(leaf_indices),
            ..Default::default()
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(vertex.position);
        self.normals.push(vertex.normal);
        self.uvs.push(vertex.uv);
        index
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.positions.len() as u32;
        for v in verts {
            self.add_vertex(v);
        }
        start
    }

    pub fn add_triangle(&mut self, group: SurfaceGroup, a: u32, b: u32, c: u32) {
        self.indices_mut(group).extend_from_slice(&[a, b, c]);
    }

    pub fn indices(&self, group: SurfaceGroup) -> &[u32] {
        match group {
            SurfaceGroup::Tube => &self.tube_indices,
            SurfaceGroup::Leaf => &self.leaf_indices,
        }
    }

    fn indices_mut(&mut self, group: SurfaceGroup) -> &mut Vec<u32> {
        match group {
            SurfaceGroup::Tube => &mut self.tube_indices,
            SurfaceGroup::Leaf => &mut self.leaf_indices,
        }
    }

    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex {
            position: self.positions[index],
            normal: self.normals[index],
            uv: self.uvs[index],
        }
    }

    /// Merge another mesh into this one, offsetting its indices
    pub fn append(&mut self, other: &MeshBuffers) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.tube_indices.extend(other.tube_indices.iter().map(|i| i + offset));
        self.leaf_indices.extend(other.leaf_indices.iter().map(|i| i + offset));
    }

    /// Centroid bounding sphere
    pub fn calculate_bounds(&mut self) {
        (self.bounds_center, self.bounds_radius) = bounding_sphere(&self.positions);
    }

    /// Interleaved vertex buffer, [`VERTEX_STRIDE`] floats per vertex
    pub fn vertex_data(&self) -> Vec<f32> {
        (0..self.vertex_count())
            .flat_map(|i| self.vertex(i).to_array())
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        (self.tube_indices.len() + self.leaf_indices.len()) / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn check_invariants(&self) -> Result<(), MeshInvariantError> {
        let (positions, normals, uvs) = (self.positions.len(), self.normals.len(), self.uvs.len());
        if positions != normals || positions != uvs {
            return Err(MeshInvariantError::LengthMismatch { positions, normals, uvs });
        }

        for group in [SurfaceGroup::Tube, SurfaceGroup::Leaf] {
            let indices = self.indices(group);
            if indices.len() % 3 != 0 {
                return Err(MeshInvariantError::PartialTriangle { group, len: indices.len() });
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions) {
                return Err(MeshInvariantError::IndexOutOfRange {
                    group,
                    index,
                    vertex_count: positions,
                });
            }
        }
        Ok(())
    }
}

/// Centroid and farthest-point distance of `points`
pub fn bounding_sphere(points: &[Vec3]) -> (Vec3, f32) {
    if points.is_empty() {
        return (Vec3::ZERO, 0.0);
    }

    let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
    let radius = points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0f32, f32::max);
    (center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> MeshBuffers {
        let mut mesh = MeshBuffers::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::ZERO, Vec3::Y),
            Vertex::new(Vec3::X, Vec3::Y),
            Vertex::new(Vec3::Z, Vec3::Y),
        ]);
        mesh.add_triangle(SurfaceGroup::Tube, 0, 1, 2);
        mesh
    }

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y).with_uv(0.5, 0.25);

        let arr = v.to_array();
        assert_eq!(arr.len(), 8);
        assert_eq!(arr[0], 1.0); // position.x
        assert_eq!(arr[4], 1.0); // normal.y
        assert_eq!(arr[6], 0.5); // uv.u
        assert_eq!(arr[7], 0.25); // uv.v
    }

    #[test]
    fn test_add_vertices_returns_start() {
        let mut mesh = triangle_mesh();
        let start = mesh.add_vertices(vec![Vertex::new(Vec3::ONE, Vec3::Y)]);
        assert_eq!(start, 3);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.uvs.len(), 4);
    }

    #[test]
    fn test_groups_are_separate() {
        let mut mesh = triangle_mesh();
        mesh.add_triangle(SurfaceGroup::Leaf, 2, 1, 0);
        assert_eq!(mesh.indices(SurfaceGroup::Tube), &[0, 1, 2]);
        assert_eq!(mesh.indices(SurfaceGroup::Leaf), &[2, 1, 0]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = triangle_mesh();
        let mut other = triangle_mesh();
        other.add_triangle(SurfaceGroup::Leaf, 0, 2, 1);

        mesh.append(&other);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(&mesh.tube_indices[3..], &[3, 4, 5]);
        assert_eq!(mesh.leaf_indices, vec![3, 5, 4]);
        assert!(mesh.check_invariants().is_ok());
    }

    #[test]
    fn test_calculate_bounds() {
        let mut mesh = MeshBuffers::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::Y),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Y),
        ]);
        mesh.calculate_bounds();

        assert!(mesh.bounds_center.length() < 0.0001);
        assert!((mesh.bounds_radius - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_empty_bounds() {
        let mut mesh = MeshBuffers::new();
        mesh.calculate_bounds();
        assert_eq!(mesh.bounds_radius, 0.0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_vertex_data_flat() {
        let mesh = triangle_mesh();
        let data = mesh.vertex_data();
        assert_eq!(data.len(), 3 * VERTEX_STRIDE);
        assert_eq!(data[VERTEX_STRIDE], 1.0); // second vertex position.x
    }

    #[test]
    fn test_check_invariants_catches_bad_index() {
        let mut mesh = triangle_mesh();
        mesh.add_triangle(SurfaceGroup::Leaf, 0, 1, 7);
        assert_eq!(
            mesh.check_invariants(),
            Err(MeshInvariantError::IndexOutOfRange {
                group: SurfaceGroup::Leaf,
                index: 7,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn test_check_invariants_catches_length_mismatch() {
        let mut mesh = triangle_mesh();
        mesh.uvs.pop();
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshInvariantError::LengthMismatch { uvs: 2, .. })
        ));
    }

    #[test]
    fn test_check_invariants_catches_partial_triangle() {
        let mut mesh = triangle_mesh();
        mesh.tube_indices.push(0);
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshInvariantError::PartialTriangle { group: SurfaceGroup::Tube, len: 4 })
        ));
    }
}
