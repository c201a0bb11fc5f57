//! # Curlfield
//!
//! Deterministic particle flow through curl noise, with a camera that
//! drifts between randomly chosen viewpoints.
//!
//! Everything stochastic is driven by explicit [`SeededSequence`] instances,
//! so a seed fully determines the particle layout, their colors and every
//! camera path.
//!
//! ## Quick Start
//!
//! ```ignore
//! use curlfield::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = SketchConfig::default()
//!         .with_particle_count(256 * 256)
//!         .with_seed(42);
//!
//!     let mut sketch = Sketch::from_config(&config)?;
//!     sketch.warm_up();
//!     for _ in 0..600 {
//!         let frame = sketch.render_frame();
//!         println!("frame {} eye {:?}", frame.frame, frame.eye);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle field
//!
//! [`ParticleField`] holds `side × side` particles placed inside the unit
//! sphere. Each tick samples
//!
//! ```text
//! v = curl_noise(p) - 0.25 * p
//! p' = p + step * v
//! ```
//!
//! for every particle against the same read-only snapshot of positions,
//! then swaps the position buffers.
//!
//! ### Camera orbit
//!
//! [`CameraOrbitAnimator`] picks a start viewpoint and a nearby end
//! viewpoint on each switch, then moves the eye along the straight segment
//! between them as the orbit phase goes from 0 to 1.
//!
//! ### Scheduling
//!
//! [`FrameScheduler`] switches the camera at each period boundary (or on
//! request), places the eye for the current phase and ticks the field once
//! per frame.
//!
//! ## GPU evaluation
//!
//! [`shader::tick_shader`] generates a WGSL compute module performing the
//! same update, and [`shader::PositionTexel`] matches its buffer layout.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod noise;
pub mod sampling;
pub mod scheduler;
pub mod sequence;
pub mod shader;
pub mod shader_utils;
pub mod sketch;
pub mod snapshot;

pub use bytemuck;
pub use camera::{Camera, CameraOrbitAnimator, OrbitConfig};
pub use color::{particle_intensities, ColorRamp};
pub use config::{CameraSettings, RenderSettings, SimulationSettings, SketchConfig};
pub use error::{ConfigError, SimulationError, SnapshotError};
pub use field::{grid_side, velocity_at, GridCoord, ParticleField, DAMPING};
pub use glam::{Vec2, Vec3, Vec4};
pub use noise::{curl_noise, simplex3};
pub use sampling::{mix, uniform_point_in_sphere, uniform_spherical_coords, Spherical};
pub use scheduler::{FrameReport, FrameScheduler, Warmup};
pub use sequence::SeededSequence;
pub use sketch::Sketch;
pub use snapshot::{render_points, save_snapshot, SnapshotOptions};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use curlfield::prelude::*;
/// ```
///
/// This imports:
/// - [`Sketch`] and [`SketchConfig`] - the assembled sketch and its settings
/// - [`ParticleField`] and [`CameraOrbitAnimator`] - the two simulated parts
/// - [`SeededSequence`] - the random source every component takes
/// - [`Vec2`], [`Vec3`], [`Vec4`] - glam vector types
pub mod prelude {
    pub use crate::camera::{Camera, CameraOrbitAnimator, OrbitConfig};
    pub use crate::color::ColorRamp;
    pub use crate::config::SketchConfig;
    pub use crate::error::{ConfigError, SimulationError, SnapshotError};
    pub use crate::field::ParticleField;
    pub use crate::scheduler::{FrameReport, FrameScheduler};
    pub use crate::sequence::SeededSequence;
    pub use crate::sketch::Sketch;
    pub use crate::{Vec2, Vec3, Vec4};
}
