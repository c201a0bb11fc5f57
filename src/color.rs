//! Particle coloring: a one-dimensional color ramp and per-particle intensity.
//!
//! Each particle gets a fixed intensity in `[0, 1)` at startup; the
//! renderer looks the intensity up in the ramp to pick the point color.

use crate::sequence::SeededSequence;

/// A horizontal strip of RGBA stops sampled with linear filtering.
///
/// Sampling treats the stops as texels of a `len × 1` texture with
/// clamp-to-edge addressing: `u = 0` and `u = 1` land on the outer texel
/// edges, so the first and last colors hold for half a texel.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    stops: Vec<[f32; 4]>,
}

impl ColorRamp {
    /// Create a ramp from RGBA stops in `0..=1`.
    ///
    /// # Panics
    ///
    /// Panics if `stops` is empty.
    pub fn new(stops: Vec<[f32; 4]>) -> Self {
        assert!(!stops.is_empty(), "Color ramp needs at least one stop");
        Self { stops }
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; a ramp holds at least one stop.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color at `u`, with `u` clamped to `[0, 1]`.
    pub fn sample(&self, u: f32) -> [f32; 4] {
        let width = self.stops.len();
        let texel = (u.clamp(0.0, 1.0) * width as f32 - 0.5).clamp(0.0, (width - 1) as f32);
        let lower = texel.floor() as usize;
        let upper = (lower + 1).min(width - 1);
        let t = texel - lower as f32;

        let a = self.stops[lower];
        let b = self.stops[upper];
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }

    /// Stops packed as RGBA8 texel data.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.stops
            .iter()
            .flat_map(|stop| stop.iter().map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8))
            .collect()
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::new(vec![
            [1.0, 0.0, 0.0, 1.0],
            [1.0, 0.5, 0.0, 1.0],
            [1.0, 0.75, 0.5, 1.0],
        ])
    }
}

/// One intensity per particle, drawn in index order.
pub fn particle_intensities(count: usize, sequence: &mut SeededSequence) -> Vec<f32> {
    (0..count).map(|_| sequence.next_value()).collect()
}
