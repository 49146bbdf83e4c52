use glam::Vec3;
use noise::{NoiseFn, Simplex};

use crate::config::ChunkConfig;

use super::DensityField;

/// Terrain-like density: simplex noise on top of a downward height gradient.
/// Higher cells get a lower density, so the air sits on top.
pub struct SimplexTerrain {
    simplex: Simplex,
    amplitude: f32,
    frequency: f32,
}

impl SimplexTerrain {
    pub fn new(seed: u32, amplitude: f32, frequency: f32) -> SimplexTerrain {
        Self {
            simplex: Simplex::new(seed),
            amplitude,
            frequency,
        }
    }

    pub fn from_config(config: &ChunkConfig) -> SimplexTerrain {
        SimplexTerrain::new(config.seed, config.amplitude, config.frequency)
    }
}

impl DensityField for SimplexTerrain {
    fn density(&self, world_pos: Vec3) -> f32 {
        let sample_pos = world_pos * self.frequency;
        // [-1; 1]
        let noise_val = self.simplex.get([
            sample_pos.x as f64,
            sample_pos.y as f64,
            sample_pos.z as f64,
        ]) as f32;
        -world_pos.y + noise_val * self.amplitude
    }
}
