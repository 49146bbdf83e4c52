use std::time::Instant;

use glam::IVec3;
use log::{trace, warn};
use rayon::prelude::*;

use crate::{config::ChunkConfig, error::ChunkError};

use super::{
    generators::DensityField,
    occupancy::Occupancy,
    voxel::{Face, Voxel},
};

/// Flat `size^3` voxel storage. Index `i` maps to
/// `(i % size, (i / size) % size, i / size^2)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoxelGrid {
    size: i32,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    pub fn empty() -> VoxelGrid {
        Self::default()
    }

    pub fn evaluate(
        config: &ChunkConfig,
        field: &dyn DensityField,
    ) -> Result<VoxelGrid, ChunkError> {
        let mut grid = VoxelGrid::empty();
        grid.evaluate_into(config, field)?;
        Ok(grid)
    }

    /// Re-evaluates the whole grid in place, keeping the previous allocation
    /// when it is large enough. On error the grid is left empty.
    pub fn evaluate_into(
        &mut self,
        config: &ChunkConfig,
        field: &dyn DensityField,
    ) -> Result<(), ChunkError> {
        self.clear();
        let cell_count = config
            .cell_count()
            .filter(|count| i32::try_from(*count).is_ok())
            .ok_or(ChunkError::GridSizeOverflow(config.size))?;
        self.size = config.size.max(0);
        if cell_count == 0 {
            warn!("Chunk size {} yields an empty grid", config.size);
            return Ok(());
        }
        if let Err(err) = self.voxels.try_reserve_exact(cell_count) {
            self.size = 0;
            return Err(err.into());
        }

        let start = Instant::now();
        let size = self.size;
        let position = config.position;
        let occupancy = Occupancy::new(field, size, config.threshold);
        (0..cell_count)
            .into_par_iter()
            .map(|index| {
                let local_pos = Self::to_3d_with(size, index);
                let mut voxel = Voxel::new(local_pos);
                voxel.empty = !occupancy.is_solid(local_pos.as_vec3() + position, local_pos);
                if voxel.empty {
                    return voxel;
                }
                for face in Face::ALL {
                    let neighbor = local_pos + face.offset();
                    voxel.face_visible[face.index()] =
                        !occupancy.is_solid(neighbor.as_vec3() + position, neighbor);
                }
                voxel
            })
            .collect_into_vec(&mut self.voxels);
        trace!(
            "Evaluated {cell_count} cells in {}ms",
            start.elapsed().as_secs_f64() * 1e3
        );
        Ok(())
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn get(&self, local_pos: IVec3) -> Option<&Voxel> {
        self.to_index(local_pos).map(|index| &self.voxels[index])
    }

    pub fn to_3d(&self, index: usize) -> IVec3 {
        Self::to_3d_with(self.size, index)
    }

    fn to_3d_with(size: i32, index: usize) -> IVec3 {
        let size = size as usize;
        IVec3::new(
            (index % size) as i32,
            ((index / size) % size) as i32,
            (index / (size * size)) as i32,
        )
    }

    pub fn to_index(&self, local_pos: IVec3) -> Option<usize> {
        if local_pos.cmplt(IVec3::ZERO).any() || local_pos.cmpge(IVec3::splat(self.size)).any() {
            return None;
        }
        let size = self.size as usize;
        Some(
            local_pos.x as usize + local_pos.y as usize * size + local_pos.z as usize * size * size,
        )
    }

    /// Total number of quads the mesh pass will emit for this grid
    pub fn visible_face_count(&self) -> usize {
        self.voxels
            .par_iter()
            .map(|voxel| voxel.visible_face_count())
            .sum()
    }

    pub fn solid_count(&self) -> usize {
        self.voxels.par_iter().filter(|voxel| !voxel.empty).count()
    }

    /// Drops the current contents but keeps the allocation for reuse
    pub fn clear(&mut self) {
        self.voxels.clear();
        self.size = 0;
    }
}
