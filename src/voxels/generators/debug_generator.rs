use glam::{IVec3, Vec3};

use super::DensityField;

/// Same density everywhere. Useful to force an all-solid or all-air chunk.
pub struct ConstantField(pub f32);

impl DensityField for ConstantField {
    fn density(&self, _world_pos: Vec3) -> f32 {
        self.0
    }
}

/// Dense inside a small set of world cells, thin everywhere else.
pub struct DebugGenerator {
    solid_cells: Vec<IVec3>,
    inside: f32,
    outside: f32,
}

impl DebugGenerator {
    pub fn new(solid_cells: Vec<IVec3>) -> DebugGenerator {
        Self {
            solid_cells,
            inside: 1.0,
            outside: -1.0,
        }
    }
}

impl DensityField for DebugGenerator {
    fn density(&self, world_pos: Vec3) -> f32 {
        let cell = world_pos.round().as_ivec3();
        if self.solid_cells.contains(&cell) {
            self.inside
        } else {
            self.outside
        }
    }
}
