use std::time::Instant;

use glam::{Vec2, Vec3};
use log::trace;

use crate::{error::ChunkError, voxels::Face, voxels::VoxelGrid};

use super::{
    bounds::Aabb,
    cube_geometry::{QUAD_INDICES, QUAD_UVS, face_corners},
};

/// Triangle mesh of one chunk. `positions`, `uvs` and `normals` are parallel
/// arrays; `normals` and `bounds` are derived from the geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub bounds: Option<Aabb>,
}

impl ChunkMesh {
    pub fn new() -> ChunkMesh {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Keeps allocations around for the next extraction
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.uvs.clear();
        self.normals.clear();
        self.bounds = None;
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn reserve_quads(&mut self, quad_count: usize) -> Result<(), ChunkError> {
        self.positions.try_reserve(quad_count * 4)?;
        self.uvs.try_reserve(quad_count * 4)?;
        self.normals.try_reserve(quad_count * 4)?;
        self.indices.try_reserve(quad_count * 6)?;
        Ok(())
    }

    fn push_quad(&mut self, corners: [Vec3; 4], offset: Vec3) {
        let first = self.positions.len() as u32;
        self.positions.extend(corners.iter().map(|corner| *corner + offset));
        self.indices.extend(QUAD_INDICES.iter().map(|i| first + i));
        self.uvs.extend_from_slice(&QUAD_UVS);
    }

    /// Per vertex normals from the accumulated (area weighted) normals of
    /// every triangle using that vertex.
    pub fn recalculate_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);
        for triangle in self.indices.chunks_exact(3) {
            let (a, b, c) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            let normal = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            self.normals[a] += normal;
            self.normals[b] += normal;
            self.normals[c] += normal;
        }
        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions);
    }
}

/// Emits one quad per visible voxel face, walking the grid in index order.
pub fn extract(grid: &VoxelGrid) -> Result<ChunkMesh, ChunkError> {
    let mut mesh = ChunkMesh::new();
    extract_into(grid, &mut mesh)?;
    Ok(mesh)
}

/// Like [`extract`] but writes into an existing mesh, reusing its buffers.
pub fn extract_into(grid: &VoxelGrid, mesh: &mut ChunkMesh) -> Result<(), ChunkError> {
    let start = Instant::now();
    mesh.clear();

    let quad_count = grid.visible_face_count();
    if quad_count
        .checked_mul(4)
        .is_none_or(|count| u32::try_from(count).is_err())
    {
        return Err(ChunkError::GridSizeOverflow(grid.size()));
    }
    mesh.reserve_quads(quad_count)?;

    // Centers the chunk around the origin
    let center = Vec3::splat(grid.size() as f32 / 2.0 - 0.5);
    for voxel in grid.voxels().iter().filter(|voxel| !voxel.empty) {
        let offset = voxel.local_pos.as_vec3() - center;
        for face in Face::ALL {
            if voxel.is_face_visible(face) {
                mesh.push_quad(face_corners(face.index()), offset);
            }
        }
    }
    mesh.recalculate_normals();
    mesh.recalculate_bounds();
    trace!(
        "Extracted {quad_count} quads in {}ms",
        start.elapsed().as_secs_f64() * 1e3
    );
    Ok(())
}
