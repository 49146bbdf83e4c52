pub mod bounds;
pub mod chunk_mesh;
pub mod cube_geometry;

pub use crate::meshes::bounds::Aabb;
pub use crate::meshes::chunk_mesh::ChunkMesh;
pub use crate::meshes::chunk_mesh::extract;
pub use crate::meshes::chunk_mesh::extract_into;
