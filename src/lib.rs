//! Procedural voxel chunks: a noise driven occupancy grid evaluated in
//! parallel, and a culled per-face mesh extracted from it.

pub mod chunk;
pub mod config;
pub mod error;
pub mod meshes;
pub mod metrics;
pub mod util;
pub mod voxels;

pub use chunk::ChunkState;
pub use config::ChunkConfig;
pub use error::{ChunkError, ConfigError};
pub use meshes::{Aabb, ChunkMesh};
pub use voxels::{Face, Voxel, VoxelGrid};
