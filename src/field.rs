//! Dense particle state advanced through a curl-noise flow field.
//!
//! Every particle is updated independently each tick:
//!
//! ```text
//! velocity  = curl(position) - 0.25 * position
//! position' = position + step * velocity
//! ```
//!
//! Positions are double-buffered. A tick reads the current buffer, writes
//! the other one, then swaps. Velocity is recomputed from scratch every
//! tick, so it needs only one buffer.
//!
//! The field is stored as a square grid so a renderer can fetch particle
//! `i` from a `side × side` texture at [`ParticleField::grid_coord`].
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::from_seed(256 * 256, 42)?;
//! field.set_step(1.0 / 1024.0);
//! field.tick();
//! let positions = field.positions();
//! ```

use glam::{Vec2, Vec3};
use tracing::{debug, warn};

use crate::error::{ConfigError, SimulationError};
use crate::noise::curl_noise;
use crate::sampling::uniform_point_in_sphere;
use crate::sequence::SeededSequence;

/// Strength of the linear pull back toward the origin.
pub const DAMPING: f32 = 0.25;

/// Velocity of the flow field at `position`.
#[inline]
pub fn velocity_at(position: Vec3) -> Vec3 {
    curl_noise(position) - DAMPING * position
}

/// Two fixed-size buffers with a flag naming the current one.
///
/// Writers fill the back buffer from the front one, then call [`swap`](Self::swap).
#[derive(Clone, Debug)]
pub struct PingPong<T> {
    buffers: [Vec<T>; 2],
    current: usize,
}

impl<T: Clone> PingPong<T> {
    /// Both buffers start as copies of `initial`.
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            buffers: [initial.clone(), initial],
            current: 0,
        }
    }
}

impl<T> PingPong<T> {
    /// The buffer readers should see.
    #[inline]
    pub fn current(&self) -> &[T] {
        &self.buffers[self.current]
    }

    /// Front buffer for reading and back buffer for writing.
    pub fn split(&mut self) -> (&[T], &mut [T]) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.current == 0 {
            (first[0].as_slice(), second[0].as_mut_slice())
        } else {
            (second[0].as_slice(), first[0].as_mut_slice())
        }
    }

    /// Make the back buffer current.
    #[inline]
    pub fn swap(&mut self) {
        self.current ^= 1;
    }

    /// Number of elements in each buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    /// Whether the buffers are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers[0].is_empty()
    }
}

/// Texel coordinate of a particle in the square state texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column, `index % side`.
    pub x: u32,
    /// Row, `index / side`.
    pub y: u32,
}

/// Side length of the square grid holding `count` particles.
///
/// Fails unless `count` is a non-zero perfect square.
pub fn grid_side(count: u32) -> Result<u32, ConfigError> {
    if count == 0 {
        return Err(ConfigError::EmptyField);
    }
    let mut side = (count as f64).sqrt() as u64;
    while side * side > count as u64 {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= count as u64 {
        side += 1;
    }
    if side * side != count as u64 {
        return Err(ConfigError::ParticleCountNotSquare { count });
    }
    Ok(side as u32)
}

/// Position and velocity state for a fixed population of particles.
#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: PingPong<Vec3>,
    velocities: Vec<Vec3>,
    side: u32,
    step: f32,
}

impl ParticleField {
    /// Place `count` particles inside the unit sphere.
    ///
    /// Draws three values per particle from `sequence`, in index order.
    /// Velocities start at zero and the step starts at zero, so the field
    /// does not move until [`set_step`](Self::set_step) is called.
    pub fn new(count: u32, sequence: &mut SeededSequence) -> Result<Self, ConfigError> {
        let side = grid_side(count)?;

        let initial: Vec<Vec3> = (0..count)
            .map(|_| uniform_point_in_sphere(sequence))
            .collect();

        debug!(count, side, seed = sequence.seed(), "particle field initialized");

        Ok(Self {
            positions: PingPong::new(initial),
            velocities: vec![Vec3::ZERO; count as usize],
            side,
            step: 0.0,
        })
    }

    /// Place `count` particles using a private sequence seeded with `seed`.
    pub fn from_seed(count: u32, seed: u32) -> Result<Self, ConfigError> {
        Self::new(count, &mut SeededSequence::new(seed))
    }

    /// Number of particles.
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Side length of the square state grid.
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Integration step applied per tick.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Change the integration step for subsequent ticks.
    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }

    /// Current particle positions, valid until the next tick.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        self.positions.current()
    }

    /// Velocities computed by the last tick.
    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Advance every particle by one explicit Euler step.
    pub fn tick(&mut self) {
        let step = self.step;
        let (current, next) = self.positions.split();

        for ((position, velocity), out) in current
            .iter()
            .zip(self.velocities.iter_mut())
            .zip(next.iter_mut())
        {
            *velocity = velocity_at(*position);
            *out = *position + step * *velocity;
        }

        self.positions.swap();
    }

    /// Run `ticks` ticks at `step`, then restore the previous step.
    pub fn tick_with_step(&mut self, ticks: u32, step: f32) {
        let nominal = self.step;
        self.step = step;
        for _ in 0..ticks {
            self.tick();
        }
        self.step = nominal;
    }

    /// Report the first particle whose position is no longer finite.
    pub fn check_finite(&self) -> Result<(), SimulationError> {
        match self.positions().iter().position(|p| !p.is_finite()) {
            Some(index) => {
                let position = self.positions()[index];
                warn!(index, ?position, step = self.step, "particle diverged");
                Err(SimulationError::NonFinite { index, position })
            }
            None => Ok(()),
        }
    }

    /// Grid cell holding particle `index`.
    #[inline]
    pub fn grid_coord(&self, index: usize) -> GridCoord {
        let side = self.side as usize;
        GridCoord {
            x: (index % side) as u32,
            y: (index / side) as u32,
        }
    }

    /// Particle index stored at `coord`.
    #[inline]
    pub fn index_of(&self, coord: GridCoord) -> usize {
        coord.y as usize * self.side as usize + coord.x as usize
    }

    /// Normalized texture lookup coordinate for particle `index`.
    pub fn tex_coord(&self, index: usize) -> Vec2 {
        let coord = self.grid_coord(index);
        let side = self.side as f32;
        Vec2::new(coord.x as f32 / side, coord.y as f32 / side)
    }

    /// Axis-aligned bounds of the current positions.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions().iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }

    /// Mean distance of the particles from the origin.
    pub fn mean_radius(&self) -> f32 {
        let sum: f32 = self.positions().iter().map(|p| p.length()).sum();
        sum / self.count() as f32
    }
}
