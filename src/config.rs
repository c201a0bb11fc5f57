//! Sketch configuration.
//!
//! Loaded from TOML. Every section has defaults, so a partial file (or no
//! file at all) works. Values are validated as a whole and every violation
//! is reported at once.
//!
//! ```toml
//! [simulation]
//! particle_count = 262144
//! step = 0.0009765625
//! seed = 42
//!
//! [camera]
//! distance_min = 1.0
//! distance_max = 5.0
//!
//! [render]
//! alpha = 0.3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, OrbitConfig};
use crate::error::ConfigError;
use crate::field::grid_side;

/// Particle simulation and frame timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of particles. Must be a perfect square.
    pub particle_count: u32,
    /// Nominal integration step per tick.
    pub step: f32,
    /// Step used during the fast first phase of warm-up.
    pub warmup_step: f32,
    /// Rounds of 60 nominal-step ticks after the fast phase.
    pub warmup_rounds: u32,
    /// Whether to warm up before the first frame.
    pub warmup: bool,
    /// Frames per camera orbit.
    pub orbit_period_frames: u64,
    /// Master seed. Chosen at startup when absent.
    pub seed: Option<i64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            particle_count: 1 << 18,
            step: 1.0 / 1024.0,
            warmup_step: 1.0 / 32.0,
            warmup_rounds: 10,
            warmup: false,
            orbit_period_frames: 60 * 10,
            seed: None,
        }
    }
}

/// Camera orbit bounds and projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub distance_min: f32,
    pub distance_max: f32,
    pub end_distance_offset: f32,
    pub end_position_offset: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraSettings {
    /// Orbit bounds for the animator.
    pub fn orbit(&self) -> OrbitConfig {
        OrbitConfig {
            distance_min: self.distance_min,
            distance_max: self.distance_max,
            end_distance_offset: self.end_distance_offset,
            end_position_offset: self.end_position_offset,
        }
    }

    /// A camera with this projection.
    pub fn camera(&self) -> Camera {
        Camera::new(self.fov_degrees, self.near, self.far)
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        let orbit = OrbitConfig::default();
        Self {
            distance_min: orbit.distance_min,
            distance_max: orbit.distance_max,
            end_distance_offset: orbit.end_distance_offset,
            end_position_offset: orbit.end_position_offset,
            fov_degrees: 50.0,
            near: 0.01,
            far: 1024.0,
        }
    }
}

/// Preview rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Point size at unit depth, in half viewport heights.
    pub particle_size: f32,
    /// Per-particle alpha multiplier.
    pub alpha: f32,
    /// RGBA color ramp stops, indexed by particle intensity.
    pub color_stops: Vec<[f32; 4]>,
    /// Snapshot width in pixels.
    pub width: u32,
    /// Snapshot height in pixels.
    pub height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            particle_size: 1.0 / 512.0,
            alpha: 0.3,
            color_stops: vec![
                [1.0, 0.0, 0.0, 1.0],
                [1.0, 0.5, 0.0, 1.0],
                [1.0, 0.75, 0.5, 1.0],
            ],
            width: 1280,
            height: 720,
        }
    }
}

/// Complete sketch configuration.
///
/// Use method chaining to override values in code:
///
/// ```ignore
/// let config = SketchConfig::default()
///     .with_particle_count(128 * 128)
///     .with_seed(42);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub simulation: SimulationSettings,
    pub camera: CameraSettings,
    pub render: RenderSettings,
}

impl SketchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SketchConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Set the particle count.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.simulation.particle_count = count;
        self
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Set the nominal integration step.
    pub fn with_step(mut self, step: f32) -> Self {
        self.simulation.step = step;
        self
    }

    /// Set the number of frames per camera orbit.
    pub fn with_orbit_period(mut self, frames: u64) -> Self {
        self.simulation.orbit_period_frames = frames;
        self
    }

    /// Enable or disable warm-up.
    pub fn with_warmup(mut self, warmup: bool) -> Self {
        self.simulation.warmup = warmup;
        self
    }

    /// Set the camera orbit bounds.
    pub fn with_orbit(mut self, orbit: OrbitConfig) -> Self {
        self.camera.distance_min = orbit.distance_min;
        self.camera.distance_max = orbit.distance_max;
        self.camera.end_distance_offset = orbit.end_distance_offset;
        self.camera.end_position_offset = orbit.end_position_offset;
        self
    }

    /// Check every value, reporting all range violations together.
    ///
    /// A non-square particle count or an out-of-range seed is reported with
    /// its own error variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        grid_side(self.simulation.particle_count)?;
        if let Some(seed) = self.simulation.seed {
            if u32::try_from(seed).is_err() {
                return Err(ConfigError::SeedOutOfRange(seed));
            }
        }

        let mut errors = Vec::new();

        validate_step(&mut errors, "simulation.step", self.simulation.step);
        validate_step(&mut errors, "simulation.warmup_step", self.simulation.warmup_step);
        if self.simulation.orbit_period_frames == 0 {
            errors.push("simulation.orbit_period_frames must be at least 1".to_string());
        }

        if let Err(ConfigError::Invalid(orbit_errors)) = self.camera.orbit().validate() {
            errors.extend(orbit_errors);
        }
        validate_range(&mut errors, "camera.fov_degrees", self.camera.fov_degrees, 1.0, 179.0);
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            errors.push(format!(
                "camera.near ({}) must be positive and below camera.far ({})",
                self.camera.near, self.camera.far
            ));
        }

        validate_range(&mut errors, "render.alpha", self.render.alpha, 0.0, 1.0);
        validate_range(&mut errors, "render.particle_size", self.render.particle_size, 0.0, 1.0);
        if self.render.color_stops.is_empty() {
            errors.push("render.color_stops must contain at least one color".to_string());
        }
        for (i, stop) in self.render.color_stops.iter().enumerate() {
            if stop.iter().any(|c| !(0.0..=1.0).contains(c)) {
                errors.push(format!("render.color_stops[{i}] channels must be in 0..=1"));
            }
        }
        if self.render.width == 0 || self.render.height == 0 {
            errors.push("render.width and render.height must be non-zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

fn validate_step(errors: &mut Vec<String>, name: &str, value: f32) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{name} must be finite and non-negative, got {value}"));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: f32, min: f32, max: f32) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} must be between {min} and {max}, got {value}"));
    }
}
