use std::{mem, sync::Arc, time::Instant};

use glam::Vec3;
use log::{debug, trace};

use crate::{
    config::ChunkConfig,
    error::ChunkError,
    meshes::{ChunkMesh, extract_into},
    metrics::ChunkMetrics,
    voxels::{
        VoxelGrid,
        generators::{DensityField, simplex::SimplexTerrain},
    },
};

/// One chunk: configuration, its voxel grid and the meshes built from it.
///
/// Both passes build into spare storage and only swap it in on success, so a
/// failed recompute keeps the last good grid and mesh. The spare buffers keep
/// their allocation between recomputes.
pub struct ChunkState {
    config: ChunkConfig,
    // Overrides the simplex terrain built from `config`
    generator: Option<Arc<dyn DensityField>>,

    grid: VoxelGrid,
    spare_grid: VoxelGrid,
    mesh: ChunkMesh,
    spare_mesh: ChunkMesh,
    // Last mesh handed to the collision side
    collider: ChunkMesh,

    translation_pending: bool,
    metrics: ChunkMetrics,
}

impl ChunkState {
    pub fn create(config: ChunkConfig) -> Result<ChunkState, ChunkError> {
        Self::build(config, None)
    }

    /// Chunk sampling a custom density field instead of the simplex terrain.
    /// Amplitude, frequency and seed are then up to the field itself.
    pub fn with_field(
        config: ChunkConfig,
        generator: Arc<dyn DensityField>,
    ) -> Result<ChunkState, ChunkError> {
        Self::build(config, Some(generator))
    }

    fn build(
        config: ChunkConfig,
        generator: Option<Arc<dyn DensityField>>,
    ) -> Result<ChunkState, ChunkError> {
        let mut chunk = Self {
            config,
            generator,
            grid: VoxelGrid::empty(),
            spare_grid: VoxelGrid::empty(),
            mesh: ChunkMesh::new(),
            spare_mesh: ChunkMesh::new(),
            collider: ChunkMesh::new(),
            translation_pending: false,
            metrics: ChunkMetrics::new(),
        };
        chunk.recalculate_cubes()?;
        chunk.recalculate_mesh()?;
        chunk.collider.clone_from(&chunk.mesh);
        debug!(
            "Created chunk of size {} with {} quads",
            chunk.config.size,
            chunk.mesh.quad_count()
        );
        Ok(chunk)
    }

    /// Releases grid and mesh storage
    pub fn destroy(self) {
        debug!("Destroying chunk of size {}", self.config.size);
        drop(self);
    }

    /// Re-evaluates the density field for every cell and replaces the grid.
    /// The mesh is left untouched until [`ChunkState::recalculate_mesh`].
    pub fn recalculate_cubes(&mut self) -> Result<(), ChunkError> {
        let start = Instant::now();
        let result = match &self.generator {
            Some(generator) => self
                .spare_grid
                .evaluate_into(&self.config, generator.as_ref()),
            None => {
                let field = SimplexTerrain::from_config(&self.config);
                self.spare_grid.evaluate_into(&self.config, &field)
            }
        };
        if let Err(err) = result {
            self.metrics.record_failure();
            return Err(err);
        }
        mem::swap(&mut self.grid, &mut self.spare_grid);
        self.metrics.record_field_pass(start.elapsed());
        debug!(
            "Recalculated {} cubes ({} solid) in {}ms",
            self.grid.len(),
            self.grid.solid_count(),
            start.elapsed().as_secs_f64() * 1e3
        );
        Ok(())
    }

    /// Rebuilds the mesh from the current grid.
    pub fn recalculate_mesh(&mut self) -> Result<(), ChunkError> {
        let start = Instant::now();
        if let Err(err) = extract_into(&self.grid, &mut self.spare_mesh) {
            self.metrics.record_failure();
            return Err(err);
        }
        mem::swap(&mut self.mesh, &mut self.spare_mesh);
        if self.config.update_collider {
            self.collider.clone_from(&self.mesh);
            trace!("Updated collider mesh");
        }
        self.metrics.record_mesh_pass(start.elapsed());
        debug!(
            "Recalculated mesh: {} vertices, {} triangles in {}ms",
            self.mesh.vertex_count(),
            self.mesh.triangle_count(),
            start.elapsed().as_secs_f64() * 1e3
        );
        Ok(())
    }

    pub fn recalculate(&mut self) -> Result<(), ChunkError> {
        self.recalculate_cubes()?;
        self.recalculate_mesh()
    }

    pub fn set_noise_amplitude(&mut self, amplitude: f32) -> Result<(), ChunkError> {
        self.config.amplitude = amplitude;
        self.recalculate()
    }

    pub fn set_noise_frequency(&mut self, frequency: f32) -> Result<(), ChunkError> {
        self.config.frequency = frequency;
        self.recalculate()
    }

    /// Takes effect on the next field pass
    pub fn set_noise_position(&mut self, position: Vec3) {
        self.config.position = position;
    }

    /// Takes effect on the next field pass
    pub fn set_noise_threshold(&mut self, threshold: f32) {
        self.config.threshold = threshold;
    }

    pub fn set_update_every_frame(&mut self, update_every_frame: bool) {
        self.config.update_every_frame = update_every_frame;
    }

    /// Enabling collider updates republishes the current geometry right away.
    pub fn set_update_collider(&mut self, update_collider: bool) -> Result<(), ChunkError> {
        self.config.update_collider = update_collider;
        if update_collider {
            self.recalculate_mesh()?;
        }
        Ok(())
    }

    /// Moves the noise by `direction * noise_speed`. The chunk is rebuilt on
    /// the next [`ChunkState::tick`].
    pub fn translate_noise(&mut self, direction: Vec3) {
        self.config.position += direction * self.config.noise_speed;
        self.translation_pending = true;
    }

    /// Returns true if the chunk was rebuilt.
    pub fn tick(&mut self) -> Result<bool, ChunkError> {
        if !self.config.update_every_frame && !self.translation_pending {
            return Ok(false);
        }
        self.recalculate()?;
        self.translation_pending = false;
        Ok(true)
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Replaces the whole configuration without recomputing anything.
    pub fn set_config(&mut self, config: ChunkConfig) {
        self.config = config;
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    pub fn collider_mesh(&self) -> &ChunkMesh {
        &self.collider
    }

    pub fn metrics(&self) -> &ChunkMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{IVec3, Vec3};

    use super::ChunkState;
    use crate::{
        config::ChunkConfig,
        error::ChunkError,
        voxels::generators::debug_generator::{ConstantField, DebugGenerator},
    };

    fn terrain_config() -> ChunkConfig {
        ChunkConfig {
            size: 10,
            amplitude: 4.0,
            frequency: 0.2,
            position: Vec3::new(0.0, -5.0, 0.0),
            threshold: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn create_runs_both_passes() {
        let chunk = ChunkState::create(terrain_config()).unwrap();
        assert_eq!(chunk.grid().len(), 1000);
        assert!(!chunk.mesh().is_empty());
        assert_eq!(chunk.mesh().quad_count(), chunk.grid().visible_face_count());
        assert_eq!(chunk.collider_mesh(), chunk.mesh());
        assert_eq!(chunk.metrics().field_passes, 1);
        assert_eq!(chunk.metrics().mesh_passes, 1);
        chunk.destroy();
    }

    #[test]
    fn recalculate_mesh_is_idempotent() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        let before = chunk.mesh().clone();
        chunk.recalculate_mesh().unwrap();
        assert_eq!(chunk.mesh(), &before);
        chunk.recalculate_mesh().unwrap();
        assert_eq!(chunk.mesh(), &before);
    }

    #[test]
    fn recalculate_cubes_is_deterministic() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        let before = chunk.grid().clone();
        chunk.recalculate_cubes().unwrap();
        assert_eq!(chunk.grid(), &before);
    }

    #[test]
    fn passes_are_decoupled() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        let mesh_before = chunk.mesh().clone();
        chunk.set_noise_position(Vec3::new(100.0, -5.0, 40.0));
        chunk.recalculate_cubes().unwrap();
        // Mesh still reflects the old grid
        assert_eq!(chunk.mesh(), &mesh_before);
        chunk.recalculate_mesh().unwrap();
        assert_eq!(chunk.mesh().quad_count(), chunk.grid().visible_face_count());
    }

    #[test]
    fn failed_recompute_keeps_previous_state() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        let grid = chunk.grid().clone();
        let mesh = chunk.mesh().clone();

        let mut config = chunk.config().clone();
        config.size = 5000;
        chunk.set_config(config);
        let res = chunk.recalculate_cubes();
        assert!(matches!(res, Err(ChunkError::GridSizeOverflow(5000))));
        assert_eq!(chunk.grid(), &grid);

        chunk.recalculate_mesh().unwrap();
        assert_eq!(chunk.mesh(), &mesh);
        assert_eq!(chunk.metrics().failed_passes, 1);
    }

    #[test]
    fn non_positive_size_gives_empty_chunk() {
        let config = ChunkConfig {
            size: 0,
            ..terrain_config()
        };
        let chunk = ChunkState::create(config).unwrap();
        assert!(chunk.grid().is_empty());
        assert!(chunk.mesh().is_empty());
    }

    #[test]
    fn isolated_cell_chunk() {
        let config = ChunkConfig {
            size: 5,
            position: Vec3::ZERO,
            threshold: 0.0,
            ..Default::default()
        };
        let chunk =
            ChunkState::with_field(config, Arc::new(DebugGenerator::new(vec![IVec3::new(2, 3, 1)])))
                .unwrap();
        assert_eq!(chunk.mesh().quad_count(), 6);
        assert_eq!(chunk.mesh().vertex_count(), 24);
        assert_eq!(chunk.mesh().indices.len(), 36);
    }

    #[test]
    fn all_solid_chunk_has_no_geometry() {
        let chunk = ChunkState::with_field(terrain_config(), Arc::new(ConstantField(10.0))).unwrap();
        assert_eq!(chunk.grid().solid_count(), chunk.grid().len());
        assert_eq!(chunk.mesh().vertex_count(), 0);
    }

    #[test]
    fn collider_follows_update_flag() {
        let mut config = terrain_config();
        config.update_collider = false;
        let mut chunk = ChunkState::create(config).unwrap();
        let collider = chunk.collider_mesh().clone();

        chunk.set_noise_amplitude(9.0).unwrap();
        assert_ne!(chunk.mesh(), &collider);
        assert_eq!(chunk.collider_mesh(), &collider);

        chunk.set_update_collider(true).unwrap();
        assert_eq!(chunk.collider_mesh(), chunk.mesh());
    }

    #[test]
    fn setters_trigger_recompute() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        chunk.set_noise_frequency(0.5).unwrap();
        assert_eq!(chunk.config().frequency, 0.5);
        assert_eq!(chunk.metrics().field_passes, 2);
        assert_eq!(chunk.metrics().mesh_passes, 2);

        chunk.set_noise_threshold(-3.0);
        assert_eq!(chunk.metrics().field_passes, 2);
    }

    #[test]
    fn tick_rebuilds_only_when_needed() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        assert!(!chunk.tick().unwrap());

        chunk.translate_noise(Vec3::X);
        assert_eq!(chunk.config().position, Vec3::new(1.0, -5.0, 0.0));
        assert!(chunk.tick().unwrap());
        assert!(!chunk.tick().unwrap());

        chunk.set_update_every_frame(true);
        assert!(chunk.tick().unwrap());
        assert!(chunk.tick().unwrap());
        assert_eq!(chunk.metrics().field_passes, 4);
    }

    #[test]
    fn translation_matches_fresh_chunk() {
        let mut chunk = ChunkState::create(terrain_config()).unwrap();
        chunk.translate_noise(Vec3::NEG_Z);
        chunk.translate_noise(Vec3::NEG_Z);
        chunk.tick().unwrap();

        let fresh = ChunkState::create(ChunkConfig {
            position: Vec3::new(0.0, -5.0, -2.0),
            ..terrain_config()
        })
        .unwrap();
        assert_eq!(chunk.grid(), fresh.grid());
        assert_eq!(chunk.mesh(), fresh.mesh());
    }
}
