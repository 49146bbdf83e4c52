use std::{env, error::Error, time::Instant};

use log::{error, info};
use voxie_chunk::{ChunkConfig, ChunkState};

const BENCHMARK_ROUNDS: u32 = 20;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let benchmark_enabled =
        args.contains(&"--benchmark".to_string()) || args.contains(&"-b".to_string());
    let config = match args.iter().position(|arg| arg == "--config" || arg == "-c") {
        Some(i) => {
            let path = args.get(i + 1).ok_or("--config needs a path")?;
            info!("Loading config from {path}");
            ChunkConfig::load(path)?
        }
        None => ChunkConfig::default(),
    };

    if benchmark_enabled {
        info!("Running in benchmark mode...");
        for i in 3..7 {
            let base: i32 = 2;
            let size = base.pow(i);
            benchmark(ChunkConfig {
                size,
                ..config.clone()
            })?;
        }
    } else {
        let start = Instant::now();
        let chunk = ChunkState::create(config)?;
        let mesh = chunk.mesh();
        info!(
            "Chunk of size {}: {} solid cells, {} quads, {} vertices, {} indices in {:.2}ms",
            chunk.config().size,
            chunk.grid().solid_count(),
            mesh.quad_count(),
            mesh.vertex_count(),
            mesh.indices.len(),
            start.elapsed().as_secs_f64() * 1e3
        );
        if let Some(bounds) = mesh.bounds {
            info!("Bounds: [{}] - [{}]", bounds.min, bounds.max);
        }
        chunk.destroy();
    }
    Ok(())
}

fn benchmark(config: ChunkConfig) -> Result<(), Box<dyn Error>> {
    let size = config.size;
    let mut chunk = ChunkState::create(config)?;
    for _ in 0..BENCHMARK_ROUNDS {
        chunk.translate_noise(glam::Vec3::X);
        chunk.tick()?;
    }
    info!(
        "{size}^3 cubes, {} quads: {}",
        chunk.mesh().quad_count(),
        chunk.metrics().summary()
    );
    chunk.destroy();
    Ok(())
}
