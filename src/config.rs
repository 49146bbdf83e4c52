use std::{fs, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of a single chunk. A recompute reads a snapshot of these and
/// never mutates them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChunkConfig {
    /// Cells per axis. Non-positive sizes produce an empty grid.
    pub size: i32,
    pub amplitude: f32,
    pub frequency: f32,
    /// World offset applied to every cell before sampling the noise
    pub position: Vec3,
    /// Density cutoff. Cells with a density above it are solid.
    pub threshold: f32,
    pub seed: u32,
    /// Recompute grid and mesh on every tick
    pub update_every_frame: bool,
    /// Republish the collider mesh after every mesh recompute
    pub update_collider: bool,
    /// How far one call to `translate_noise` moves the noise position
    pub noise_speed: f32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 16,
            amplitude: 4.0,
            frequency: 0.08,
            position: Vec3::ZERO,
            threshold: 0.0,
            seed: 0,
            update_every_frame: false,
            update_collider: true,
            noise_speed: 1.0,
        }
    }
}

impl ChunkConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ChunkConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(input: &str) -> Result<ChunkConfig, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Number of cells in the grid; zero for non-positive sizes.
    pub fn cell_count(&self) -> Option<usize> {
        if self.size <= 0 {
            return Some(0);
        }
        let size = self.size as usize;
        size.checked_mul(size)?.checked_mul(size)
    }
}
