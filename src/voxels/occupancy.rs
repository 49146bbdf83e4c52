use glam::{IVec3, Vec3};

use super::generators::DensityField;

/// Boundary-inclusive solidity test for one chunk.
pub struct Occupancy<'a> {
    field: &'a dyn DensityField,
    size: i32,
    threshold: f32,
}

impl<'a> Occupancy<'a> {
    pub fn new(field: &'a dyn DensityField, size: i32, threshold: f32) -> Occupancy<'a> {
        Self {
            field,
            size,
            threshold,
        }
    }

    pub fn contains(&self, local_pos: IVec3) -> bool {
        local_pos.cmpge(IVec3::ZERO).all() && local_pos.cmplt(IVec3::splat(self.size)).all()
    }

    /// Cells outside `[0, size - 1]` are always solid, so no face is ever
    /// emitted against the chunk border.
    pub fn is_solid(&self, world_pos: Vec3, local_pos: IVec3) -> bool {
        if !self.contains(local_pos) {
            return true;
        }
        self.field.density(world_pos) > self.threshold
    }
}
