//! Camera and the randomized orbit that animates it.
//!
//! [`CameraOrbitAnimator`] keeps a `start`/`end` viewpoint pair. A
//! [`switch`](CameraOrbitAnimator::switch) draws a fresh `start` and nudges
//! it into `end`; [`evaluate`](CameraOrbitAnimator::evaluate) moves the eye
//! along the straight segment between them. The viewing direction is fixed
//! at switch time: from the segment midpoint toward the world origin.

use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};
use tracing::debug;

use crate::error::ConfigError;
use crate::sampling::{mix, uniform_spherical_coords, Spherical};
use crate::sequence::SeededSequence;

/// Perspective camera with an eye position and a look direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Unit view direction.
    forward: Vec3,
    /// World up vector.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Camera {
    /// Camera at `(0, 0, 1)` looking toward the origin.
    pub fn new(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::Z,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_degrees,
            near,
            far,
        }
    }

    /// Unit view direction.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Point the camera at `target` from its current position.
    ///
    /// Leaves the direction unchanged when `target` coincides with the eye.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.length_squared() > 0.0 {
            self.forward = direction.normalize();
        }
    }

    /// View matrix for rendering.
    ///
    /// When looking straight along `up`, an arbitrary axis orthogonal to the
    /// view direction stands in for it.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.effective_up())
    }

    fn effective_up(&self) -> Vec3 {
        if self.forward.cross(self.up).length_squared() > 1e-12 {
            self.up
        } else {
            self.forward.any_orthonormal_vector()
        }
    }

    /// Projection matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(50.0, 0.01, 1024.0)
    }
}

/// Bounds for sampling orbit endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    /// Smallest start distance from the origin.
    pub distance_min: f32,
    /// Largest start distance from the origin.
    pub distance_max: f32,
    /// Largest extra distance of `end` over `start`.
    pub end_distance_offset: f32,
    /// Largest angular travel, as a fraction of a full turn.
    pub end_position_offset: f32,
}

impl OrbitConfig {
    /// Check that the bounds describe a usable orbit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let values = [
            ("camera.distance_min", self.distance_min),
            ("camera.distance_max", self.distance_max),
            ("camera.end_distance_offset", self.end_distance_offset),
            ("camera.end_position_offset", self.end_position_offset),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite"));
            } else if value < 0.0 {
                errors.push(format!("{name} must not be negative, got {value}"));
            }
        }
        if self.distance_min > self.distance_max {
            errors.push(format!(
                "camera.distance_min ({}) exceeds camera.distance_max ({})",
                self.distance_min, self.distance_max
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            distance_min: 1.0,
            distance_max: 5.0,
            end_distance_offset: 0.125,
            end_position_offset: 1.0 / 32.0,
        }
    }
}

/// Animates a camera between two randomly sampled viewpoints.
#[derive(Clone, Debug)]
pub struct CameraOrbitAnimator {
    camera: Camera,
    config: OrbitConfig,
    sequence: SeededSequence,
    start: Spherical,
    end: Spherical,
    start_position: Vec3,
    end_position: Vec3,
    switches: u64,
}

impl CameraOrbitAnimator {
    /// Take ownership of `camera` and perform the first switch.
    pub fn new(
        camera: Camera,
        config: OrbitConfig,
        sequence: SeededSequence,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut animator = Self {
            camera,
            config,
            sequence,
            start: Spherical::default(),
            end: Spherical::default(),
            start_position: Vec3::ZERO,
            end_position: Vec3::ZERO,
            switches: 0,
        };
        animator.switch();
        Ok(animator)
    }

    /// Draw a new `start`/`end` pair and reset the camera to `start`.
    ///
    /// Consumes six values from the sequence: three for `start`, then one
    /// each for the radius, `phi` and `theta` offsets of `end`.
    pub fn switch(&mut self) {
        let start = uniform_spherical_coords(
            self.config.distance_min,
            self.config.distance_max,
            &mut self.sequence,
        );

        let radius_offset = self.config.end_distance_offset * self.sequence.next_value();
        let phi_offset = mix(
            0.0,
            TAU * self.config.end_position_offset,
            self.sequence.next_value(),
        );
        let theta_offset = mix(
            0.0,
            PI * self.config.end_position_offset,
            self.sequence.next_value(),
        );

        self.start = start;
        self.end = Spherical::new(
            start.radius + radius_offset,
            start.phi + phi_offset,
            start.theta + theta_offset,
        );
        self.start_position = self.start.to_cartesian();
        self.end_position = self.end.to_cartesian();
        self.switches += 1;

        self.update_target();
        self.camera.position = self.start_position;

        debug!(
            switch = self.switches,
            start = ?self.start_position,
            end = ?self.end_position,
            "camera orbit switched"
        );
    }

    /// Move the eye to `start + t * (end - start)` and return it.
    ///
    /// `t` is the orbit phase in `[0, 1)`. The look direction is untouched.
    pub fn evaluate(&mut self, t: f32) -> Vec3 {
        self.camera.position = self.position_at(t);
        self.camera.position
    }

    /// Eye position at phase `t` without touching the camera.
    #[inline]
    pub fn position_at(&self, t: f32) -> Vec3 {
        self.start_position.lerp(self.end_position, t)
    }

    /// Orient the camera as seen from the segment midpoint toward the origin.
    fn update_target(&mut self) {
        self.camera.position = self.target();
        self.camera.look_at(Vec3::ZERO);
    }

    /// Midpoint of the current segment.
    pub fn target(&self) -> Vec3 {
        self.start_position.lerp(self.end_position, 0.5)
    }

    /// The animated camera.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit bounds.
    #[inline]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Start viewpoint.
    #[inline]
    pub fn start(&self) -> Spherical {
        self.start
    }

    /// End viewpoint.
    #[inline]
    pub fn end(&self) -> Spherical {
        self.end
    }

    /// Start viewpoint in Cartesian space.
    #[inline]
    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// End viewpoint in Cartesian space.
    #[inline]
    pub fn end_position(&self) -> Vec3 {
        self.end_position
    }

    /// Number of switches performed so far, including the initial one.
    #[inline]
    pub fn switches(&self) -> u64 {
        self.switches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator(seed: u32) -> CameraOrbitAnimator {
        CameraOrbitAnimator::new(
            Camera::default(),
            OrbitConfig::default(),
            SeededSequence::new(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_camera_look_at() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);

        let before = camera.forward();
        camera.look_at(camera.position);
        assert_eq!(camera.forward(), before);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(1.0, 2.0, 3.0);
        camera.look_at(Vec3::ZERO);
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(eye.length() < 1e-5);
    }

    #[test]
    fn test_view_matrix_finite_looking_along_up() {
        for eye in [Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -2.0, 0.0)] {
            let mut camera = Camera::default();
            camera.position = eye;
            camera.look_at(Vec3::ZERO);

            let view = camera.view_matrix();
            assert!(view.is_finite(), "view from {:?} is {:?}", eye, view);
            assert!(view.transform_point3(eye).length() < 1e-5);
            let origin = view.transform_point3(Vec3::ZERO);
            assert!((origin - Vec3::new(0.0, 0.0, -eye.length())).length() < 1e-5);
        }
    }

    #[test]
    fn test_origin_in_front_after_switch() {
        let animator = animator(5);
        let camera = animator.camera();
        let view = camera.view_matrix().transform_point3(Vec3::ZERO);
        // Right-handed view space looks down -Z.
        assert!(view.z < 0.0);
    }

    #[test]
    fn test_switch_resets_to_start() {
        let mut animator = animator(1);
        animator.evaluate(0.7);
        animator.switch();
        assert_eq!(animator.camera().position, animator.start_position());
    }

    #[test]
    fn test_evaluate_zero_is_start() {
        let mut animator = animator(3);
        assert_eq!(animator.evaluate(0.0), animator.start_position());
    }

    #[test]
    fn test_evaluate_is_collinear() {
        let mut animator = animator(11);
        let start = animator.start_position();
        let segment = animator.end_position() - start;
        for i in 1..10 {
            let t = i as f32 / 10.0;
            let p = animator.evaluate(t);
            let offset = p - start;
            assert!(offset.cross(segment).length() < 1e-5);
            assert!((offset.length() - t * segment.length()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_evaluate_keeps_direction() {
        let mut animator = animator(12);
        let forward = animator.camera().forward();
        animator.evaluate(0.3);
        animator.evaluate(0.9);
        assert_eq!(animator.camera().forward(), forward);
    }

    #[test]
    fn test_direction_points_from_midpoint_to_origin() {
        let animator = animator(13);
        let expected = (-animator.target()).normalize();
        assert!((animator.camera().forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_end_perturbs_start() {
        let config = OrbitConfig::default();
        for seed in 0..50 {
            let animator = animator(seed);
            let (start, end) = (animator.start(), animator.end());
            assert!(end.radius >= start.radius);
            assert!(end.radius <= start.radius + config.end_distance_offset);
            assert!(end.phi >= start.phi);
            assert!(end.phi <= start.phi + TAU * config.end_position_offset + 1e-5);
            assert!(end.theta >= start.theta);
            assert!(end.theta <= start.theta + PI * config.end_position_offset + 1e-5);
        }
    }

    #[test]
    fn test_switch_same_state_same_pair() {
        let mut a = animator(21);
        let mut b = a.clone();
        a.switch();
        b.switch();
        assert_eq!(a.start(), b.start());
        assert_eq!(a.end(), b.end());
    }

    #[test]
    fn test_switch_discards_previous_pair() {
        let mut animator = animator(22);
        let first = (animator.start(), animator.end());
        animator.switch();
        assert_ne!((animator.start(), animator.end()), first);
        assert_eq!(animator.switches(), 2);
    }

    #[test]
    fn test_draw_order() {
        let config = OrbitConfig::default();
        let animator = animator(31);
        let mut seq = SeededSequence::new(31);

        let start = uniform_spherical_coords(config.distance_min, config.distance_max, &mut seq);
        let radius = start.radius + config.end_distance_offset * seq.next_value();
        assert_eq!(animator.start(), start);
        assert_eq!(animator.end().radius, radius);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OrbitConfig {
            distance_min: 6.0,
            distance_max: 5.0,
            ..OrbitConfig::default()
        };
        let result = CameraOrbitAnimator::new(Camera::default(), config, SeededSequence::new(0));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = OrbitConfig {
            end_distance_offset: f32::NAN,
            ..OrbitConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
