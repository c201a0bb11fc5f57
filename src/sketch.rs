//! The assembled sketch: field, colors, camera and scheduler built from one
//! configuration and one master seed.

use rand::Rng;
use tracing::info;

use crate::camera::CameraOrbitAnimator;
use crate::color::{particle_intensities, ColorRamp};
use crate::config::SketchConfig;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::scheduler::{FrameReport, FrameScheduler, Warmup};
use crate::sequence::SeededSequence;

/// Offset from the master seed to the camera's sequence.
pub const CAMERA_SEED_OFFSET: u32 = 1337;

/// Ticks in the fast phase of warm-up.
pub const WARMUP_FAST_TICKS: u32 = 60;

/// Pick a master seed for an unseeded run.
pub fn random_seed() -> u32 {
    rand::thread_rng().gen_range(0..1024)
}

/// A running sketch.
///
/// # Example
///
/// ```ignore
/// let config = SketchConfig::default().with_particle_count(128 * 128);
/// let mut sketch = Sketch::new(&config, 42)?;
/// for _ in 0..600 {
///     let frame = sketch.render_frame();
///     draw(sketch.positions(), sketch.animator().camera(), frame);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Sketch {
    config: SketchConfig,
    seed: u32,
    field: ParticleField,
    intensities: Vec<f32>,
    ramp: ColorRamp,
    animator: CameraOrbitAnimator,
    scheduler: FrameScheduler,
}

impl Sketch {
    /// Build a sketch from a validated configuration.
    ///
    /// The master sequence seeded with `seed` places the particles and then
    /// draws their intensities. The camera draws from a separate sequence
    /// seeded with `seed + 1337`.
    pub fn new(config: &SketchConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut master = SeededSequence::new(seed);
        let mut field = ParticleField::new(config.simulation.particle_count, &mut master)?;
        let intensities = particle_intensities(field.count(), &mut master);
        field.set_step(config.simulation.step);

        let animator = CameraOrbitAnimator::new(
            config.camera.camera(),
            config.camera.orbit(),
            master.derive(CAMERA_SEED_OFFSET),
        )?;

        info!(
            seed,
            particles = field.count(),
            side = field.side(),
            period = config.simulation.orbit_period_frames,
            "sketch created"
        );

        Ok(Self {
            config: config.clone(),
            seed,
            field,
            intensities,
            ramp: ColorRamp::new(config.render.color_stops.clone()),
            animator,
            scheduler: FrameScheduler::new(config.simulation.orbit_period_frames),
        })
    }

    /// Build a sketch with the configured seed, or a random one if unset.
    pub fn from_config(config: &SketchConfig) -> Result<Self, ConfigError> {
        let seed = match config.simulation.seed {
            Some(seed) => SeededSequence::try_from_seed(seed)?.seed(),
            None => {
                let seed = random_seed();
                info!(seed, "no seed configured, picked one");
                seed
            }
        };
        Self::new(config, seed)
    }

    /// The warm-up schedule described by the configuration.
    pub fn warmup(&self) -> Warmup {
        Warmup {
            warmup_step: self.config.simulation.warmup_step,
            warmup_ticks: WARMUP_FAST_TICKS,
            nominal_step: self.config.simulation.step,
            rounds: self.config.simulation.warmup_rounds,
        }
    }

    /// Run the configured warm-up on the field.
    pub fn warm_up(&mut self) {
        let warmup = self.warmup();
        warmup.run(&mut self.field);
    }

    /// Advance one frame.
    pub fn render_frame(&mut self) -> FrameReport {
        self.scheduler.advance(&mut self.field, &mut self.animator)
    }

    /// Switch the camera at the start of the next frame.
    pub fn request_switch(&mut self) {
        self.scheduler.request_switch();
    }

    /// Configuration the sketch was built from.
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Master seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The particle field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Current particle positions.
    pub fn positions(&self) -> &[glam::Vec3] {
        self.field.positions()
    }

    /// Per-particle color ramp coordinates.
    pub fn intensities(&self) -> &[f32] {
        &self.intensities
    }

    /// Color ramp indexed by intensity.
    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    /// The camera animator, holding the camera for the current frame.
    pub fn animator(&self) -> &CameraOrbitAnimator {
        &self.animator
    }

    /// Frame counter and orbit period.
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::uniform_point_in_sphere;

    fn small_config() -> SketchConfig {
        SketchConfig::default()
            .with_particle_count(64)
            .with_orbit_period(10)
    }

    #[test]
    fn test_draw_order_positions_then_intensities() {
        let sketch = Sketch::new(&small_config(), 42).unwrap();

        let mut reference = SeededSequence::new(42);
        for p in sketch.positions() {
            assert_eq!(*p, uniform_point_in_sphere(&mut reference));
        }
        for v in sketch.intensities() {
            assert_eq!(*v, reference.next_value());
        }
    }

    #[test]
    fn test_camera_uses_offset_seed() {
        let config = small_config();
        let sketch = Sketch::new(&config, 42).unwrap();
        let standalone = CameraOrbitAnimator::new(
            config.camera.camera(),
            config.camera.orbit(),
            SeededSequence::new(42 + CAMERA_SEED_OFFSET),
        )
        .unwrap();
        assert_eq!(sketch.animator().start(), standalone.start());
        assert_eq!(sketch.animator().end(), standalone.end());
    }

    #[test]
    fn test_step_applied() {
        let config = small_config().with_step(0.01);
        let sketch = Sketch::new(&config, 1).unwrap();
        assert_eq!(sketch.field().step(), 0.01);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SketchConfig::default().with_particle_count(10);
        assert!(matches!(
            Sketch::new(&config, 1),
            Err(ConfigError::ParticleCountNotSquare { count: 10 })
        ));
    }

    #[test]
    fn test_from_config_reads_seed() {
        let config = small_config().with_seed(9);
        assert_eq!(Sketch::from_config(&config).unwrap().seed(), 9);

        let unseeded = Sketch::from_config(&small_config()).unwrap();
        assert!(unseeded.seed() < 1024);

        let negative = small_config().with_seed(-1);
        assert!(matches!(
            Sketch::from_config(&negative),
            Err(ConfigError::SeedOutOfRange(-1))
        ));
    }

    #[test]
    fn test_warmup_schedule_from_config() {
        let sketch = Sketch::new(&small_config(), 1).unwrap();
        let warmup = sketch.warmup();
        assert_eq!(warmup.warmup_ticks, 60);
        assert_eq!(warmup.rounds, 10);
        assert_eq!(warmup.total_ticks(), 660);
    }

    #[test]
    fn test_render_frame_advances() {
        let mut sketch = Sketch::new(&small_config(), 3).unwrap();
        let first = sketch.render_frame();
        let second = sketch.render_frame();
        assert!(first.switched);
        assert!(!second.switched);
        assert_eq!(second.frame, 1);
        assert_eq!(sketch.scheduler().frame(), 2);
    }
}
