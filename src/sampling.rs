//! Sphere sampling helpers driven by a [`SeededSequence`].
//!
//! Camera viewpoints and particle placement use different formulas.
//! Viewpoints mix uniform draws straight into both angles, which crowds
//! samples toward the poles. Particle placement uses the `acos(1 - 2u)`
//! polar correction and a `sqrt(u)` radius.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::sequence::SeededSequence;

/// Linear blend between `a` and `b`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A point in spherical coordinates.
///
/// `phi` is measured from the +Y axis and `theta` around it, so a camera
/// sitting at `(r, 0, _)` looks straight down. This is the y-up convention
/// the renderer expects.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f32,
    /// Angle from the +Y axis, in radians.
    pub phi: f32,
    /// Angle around the Y axis, in radians, starting at +Z.
    pub theta: f32,
}

impl Spherical {
    /// Create spherical coordinates.
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert to a Cartesian point.
    pub fn to_cartesian(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Random spherical coordinates with a radius in `[radius_low, radius_high]`.
///
/// Draw order: `phi = 2π·u1`, `theta = π·u2`, `radius = mix(low, high, u3)`.
/// Not area-uniform.
pub fn uniform_spherical_coords(
    radius_low: f32,
    radius_high: f32,
    sequence: &mut SeededSequence,
) -> Spherical {
    let phi = TAU * sequence.next_value();
    let theta = PI * sequence.next_value();
    let radius = mix(radius_low, radius_high, sequence.next_value());
    Spherical::new(radius, phi, theta)
}

/// Random point inside the unit sphere.
///
/// Draw order: `r = sqrt(u1)`, `inclination = 2π·u2`, `azimuth = acos(1 - 2·u3)`.
pub fn uniform_point_in_sphere(sequence: &mut SeededSequence) -> Vec3 {
    let r = sequence.next_value().sqrt();
    let inclination = TAU * sequence.next_value();
    let azimuth = (1.0 - 2.0 * sequence.next_value()).acos();

    Vec3::new(
        r * inclination.cos() * azimuth.sin(),
        r * inclination.sin() * azimuth.sin(),
        r * azimuth.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix() {
        assert_eq!(mix(1.0, 5.0, 0.0), 1.0);
        assert_eq!(mix(1.0, 5.0, 1.0), 5.0);
        assert!((mix(1.0, 5.0, 0.25) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spherical_axes() {
        let up = Spherical::new(2.0, 0.0, 0.0).to_cartesian();
        assert!((up - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);

        let front = Spherical::new(1.0, PI / 2.0, 0.0).to_cartesian();
        assert!((front - Vec3::Z).length() < 1e-6);

        let side = Spherical::new(1.0, PI / 2.0, PI / 2.0).to_cartesian();
        assert!((side - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_spherical_radius_preserved() {
        let p = Spherical::new(3.5, 1.1, 4.2).to_cartesian();
        assert!((p.length() - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_spherical_coords_bounds() {
        let mut seq = SeededSequence::new(5);
        for _ in 0..1000 {
            let s = uniform_spherical_coords(1.0, 5.0, &mut seq);
            assert!((1.0..=5.0).contains(&s.radius));
            assert!((0.0..TAU).contains(&s.phi));
            assert!((0.0..PI).contains(&s.theta));
        }
    }

    #[test]
    fn test_spherical_coords_draw_order() {
        let mut seq = SeededSequence::new(99);
        let mut reference = SeededSequence::new(99);
        let s = uniform_spherical_coords(0.0, 10.0, &mut seq);

        assert_eq!(s.phi, TAU * reference.next_value());
        assert_eq!(s.theta, PI * reference.next_value());
        assert_eq!(s.radius, 10.0 * reference.next_value());
    }

    #[test]
    fn test_point_in_sphere_bounds() {
        let mut seq = SeededSequence::new(3);
        for _ in 0..10_000 {
            let p = uniform_point_in_sphere(&mut seq);
            assert!(p.length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_point_in_sphere_radial_distribution() {
        // sqrt(u) radius: P(r < x) = x^2, so a quarter of the points fall
        // inside half the radius. A linear radius would put half there.
        let mut seq = SeededSequence::new(2024);
        let samples = 40_000;
        let inner = (0..samples)
            .filter(|_| uniform_point_in_sphere(&mut seq).length() < 0.5)
            .count();
        let fraction = inner as f32 / samples as f32;
        assert!((fraction - 0.25).abs() < 0.02, "inner fraction {}", fraction);
    }

    #[test]
    fn test_point_in_sphere_direction_is_unbiased() {
        // The acos correction makes cos(azimuth) uniform in [-1, 1], so the
        // mean of each normalized component sits near zero.
        let mut seq = SeededSequence::new(77);
        let samples = 20_000;
        let mut sum = Vec3::ZERO;
        let mut upper = 0;
        for _ in 0..samples {
            let dir = uniform_point_in_sphere(&mut seq).normalize_or_zero();
            sum += dir;
            if dir.z > 0.5 {
                upper += 1;
            }
        }
        let mean = sum / samples as f32;
        assert!(mean.length() < 0.03, "mean direction {:?}", mean);
        // Cap above z = 0.5 holds a quarter of the sphere surface.
        let cap = upper as f32 / samples as f32;
        assert!((cap - 0.25).abs() < 0.02, "cap fraction {}", cap);
    }
}
