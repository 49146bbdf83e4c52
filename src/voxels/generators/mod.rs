use glam::Vec3;

pub mod debug_generator;
pub mod simplex;

pub trait DensityField: Sync + Send {
    /// Scalar density at a position in **world** space
    fn density(&self, world_pos: Vec3) -> f32;
}
