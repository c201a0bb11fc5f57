mod cli;

use std::process::ExitCode;

use curlfield::{save_snapshot, ConfigError, Sketch, SketchConfig, SnapshotOptions};
use tracing::{error, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn load_config(args: &cli::Args) -> Result<SketchConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SketchConfig::load(path)?,
        None => SketchConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(count) = args.particles {
        config = config.with_particle_count(count);
    }
    if args.warmup {
        config = config.with_warmup(true);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("curlfield=info");
    let directive: Directive = match log_directive.parse() {
        Ok(directive) => directive,
        Err(_) => match "curlfield=info".parse() {
            Ok(directive) => directive,
            Err(_) => return ExitCode::FAILURE,
        },
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sketch = match Sketch::from_config(&config) {
        Ok(sketch) => sketch,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if config.simulation.warmup {
        sketch.warm_up();
    }

    let frames = args
        .frames
        .unwrap_or(config.simulation.orbit_period_frames);
    info!(frames, "simulating");

    for _ in 0..frames {
        let report = sketch.render_frame();
        if report.switched {
            info!(
                frame = report.frame,
                eye = ?report.eye,
                target = ?sketch.animator().target(),
                "orbit started"
            );
        }
    }

    if let Err(e) = sketch.field().check_finite() {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    info!(
        mean_radius = sketch.field().mean_radius(),
        frame = sketch.scheduler().frame(),
        "simulation finished"
    );

    if let Some(path) = &args.snapshot {
        let options = SnapshotOptions::from(&config.render);
        if let Err(e) = save_snapshot(
            path,
            sketch.positions(),
            sketch.intensities(),
            sketch.ramp(),
            sketch.animator().camera(),
            &options,
        ) {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
