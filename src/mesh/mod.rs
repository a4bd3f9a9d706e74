pub mod buffers;
pub mod generator;
pub mod leaf;
pub mod tube;

pub use buffers::{MeshBuffers, MeshInvariantError, SurfaceGroup, Vertex, VERTEX_STRIDE};
pub use generator::{MeshGenerator, PathMeshInfo};
pub use leaf::{LeafParams, LeafQuadEmitter};
pub use tube::{TubeMeshSynthesizer, TubeParams};
