use std::path::PathBuf;

use clap::Parser;

/// Curlfield: particles drifting through curl noise, seen from a slowly
/// orbiting camera.
#[derive(Parser, Debug)]
#[command(name = "curlfield", version, about)]
pub struct Args {
    /// Config file path.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Master seed, overriding the config.
    #[arg(long)]
    pub seed: Option<i64>,

    /// Particle count, overriding the config. Must be a perfect square.
    #[arg(long)]
    pub particles: Option<u32>,

    /// Number of frames to simulate. Defaults to one orbit period.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Warm up the field before the first frame.
    #[arg(long)]
    pub warmup: bool,

    /// Write a PNG of the final frame to this path.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
