//! Error types for curlfield.
//!
//! Configuration problems are fatal and surface at construction time.
//! Numeric divergence during a tick is never recovered from; it is only
//! reported through [`SimulationError`] when a caller asks for it.

use std::fmt;

use glam::Vec3;

/// Errors detected while building or loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Particle count has no integer square root.
    ParticleCountNotSquare {
        /// The rejected count.
        count: u32,
    },
    /// Particle count of zero.
    EmptyField,
    /// Seed outside `0..=u32::MAX`.
    SeedOutOfRange(i64),
    /// One or more values failed range validation.
    Invalid(Vec<String>),
    /// Failed to read the config file.
    Io(std::io::Error),
    /// Failed to parse TOML.
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParticleCountNotSquare { count } => write!(
                f,
                "Particle count {} is not a perfect square. The field is stored as a square grid.",
                count
            ),
            ConfigError::EmptyField => write!(f, "Particle count must be greater than zero"),
            ConfigError::SeedOutOfRange(seed) => {
                write!(f, "Seed {} is outside the accepted range 0..={}", seed, u32::MAX)
            }
            ConfigError::Invalid(errors) => {
                write!(f, "Invalid configuration: {}", errors.join("; "))
            }
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors reported by a running simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A particle position left the finite range after integration.
    NonFinite {
        /// Index of the first offending particle.
        index: usize,
        /// Its position after the last tick.
        position: Vec3,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NonFinite { index, position } => write!(
                f,
                "Particle {} diverged to non-finite position {:?}. Try a smaller step.",
                index, position
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Errors that can occur while writing a preview snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Viewport has zero width or height.
    EmptyViewport,
    /// Failed to encode or write the image.
    Image(image::ImageError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::EmptyViewport => write!(f, "Snapshot viewport must be at least 1x1"),
            SnapshotError::Image(e) => write!(f, "Failed to write snapshot: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Image(e) => Some(e),
            SnapshotError::EmptyViewport => None,
        }
    }
}

impl From<image::ImageError> for SnapshotError {
    fn from(e: image::ImageError) -> Self {
        SnapshotError::Image(e)
    }
}
