use std::time::Duration;

use crate::util::SimpleMovingAverage;

/// Rolling timings of the two recompute passes of a chunk, in micro seconds.
pub struct ChunkMetrics {
    pub sma_field_time: SimpleMovingAverage,
    pub sma_mesh_time: SimpleMovingAverage,
    pub field_passes: u64,
    pub mesh_passes: u64,
    pub failed_passes: u64,
}

impl ChunkMetrics {
    pub fn new() -> ChunkMetrics {
        Self {
            sma_field_time: SimpleMovingAverage::new(100),
            sma_mesh_time: SimpleMovingAverage::new(100),
            field_passes: 0,
            mesh_passes: 0,
            failed_passes: 0,
        }
    }

    pub fn record_field_pass(&mut self, elapsed: Duration) {
        self.field_passes += 1;
        self.sma_field_time.add(elapsed.as_secs_f32() * 1e6);
    }

    pub fn record_mesh_pass(&mut self, elapsed: Duration) {
        self.mesh_passes += 1;
        self.sma_mesh_time.add(elapsed.as_secs_f32() * 1e6);
    }

    pub fn record_failure(&mut self) {
        self.failed_passes += 1;
    }

    pub fn summary(&self) -> String {
        format!(
            "field pass: {:.1} micro-s avg over {} runs, mesh pass: {:.1} micro-s avg over {} runs, {} failed",
            self.sma_field_time.get(),
            self.field_passes,
            self.sma_mesh_time.get(),
            self.mesh_passes,
            self.failed_passes,
        )
    }
}

impl Default for ChunkMetrics {
    fn default() -> Self {
        Self::new()
    }
}
