pub mod generators;
pub mod grid;
pub mod occupancy;
pub mod voxel;

pub use crate::voxels::grid::VoxelGrid;
pub use crate::voxels::occupancy::Occupancy;
pub use crate::voxels::voxel::Face;
pub use crate::voxels::voxel::Voxel;
