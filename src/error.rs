use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkError {
    /// Face lookups only accept the six canonical indices `0..=5`.
    #[error("can't get face at index {0}: out of bounds (expected 0..=5)")]
    InvalidFaceIndex(usize),
    #[error("failed to allocate chunk storage: {0}")]
    Allocation(#[from] TryReserveError),
    #[error("chunk size {0} is too large to index")]
    GridSizeOverflow(i32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
