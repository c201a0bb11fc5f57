//! End-to-end checks of the assembled simulation.

use std::f32::consts::PI;

use curlfield::prelude::*;
use curlfield::{grid_side, GridCoord};

fn run(seed: u32, ticks: u32) -> Vec<Vec3> {
    let mut field = ParticleField::from_seed(32 * 32, seed).unwrap();
    field.set_step(1.0 / 64.0);
    for _ in 0..ticks {
        field.tick();
    }
    field.positions().to_vec()
}

#[test]
fn test_runs_are_bit_identical() {
    let a = run(7, 50);
    let b = run(7, 50);
    assert_eq!(a.len(), b.len());
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(p.to_array().map(f32::to_bits), q.to_array().map(f32::to_bits));
    }
}

#[test]
fn test_different_seeds_differ() {
    assert_ne!(run(7, 0), run(8, 0));
}

#[test]
fn test_initial_positions_inside_unit_sphere() {
    let field = ParticleField::from_seed(64 * 64, 11).unwrap();
    assert!(field.positions().iter().all(|p| p.length() <= 1.0 + 1e-6));
    assert!(field.velocities().iter().all(|v| *v == Vec3::ZERO));
}

#[test]
fn test_orbit_scenario_seed_42() {
    let config = OrbitConfig {
        distance_min: 1.0,
        distance_max: 5.0,
        end_distance_offset: 0.125,
        end_position_offset: 1.0 / 32.0,
    };
    let mut animator =
        CameraOrbitAnimator::new(Camera::default(), config, SeededSequence::new(42)).unwrap();
    animator.switch();

    let start = animator.start();
    let end = animator.end();
    assert!((1.0..=5.0).contains(&start.radius));
    assert!(end.radius >= start.radius && end.radius <= start.radius + 0.125);
    assert!(end.phi >= start.phi && end.phi <= start.phi + 2.0 * PI / 32.0);
    assert!(end.theta >= start.theta && end.theta <= start.theta + PI / 32.0);

    let midpoint = (start.to_cartesian() + end.to_cartesian()) * 0.5;
    let eye = animator.evaluate(0.5);
    assert!((eye - midpoint).length() < 1e-5);
    assert_eq!(animator.evaluate(0.0), start.to_cartesian());
}

#[test]
fn test_switch_depends_only_on_sequence_state() {
    let config = OrbitConfig::default();
    let a = CameraOrbitAnimator::new(Camera::default(), config, SeededSequence::new(5)).unwrap();
    let b = CameraOrbitAnimator::new(Camera::default(), config, SeededSequence::new(5)).unwrap();
    let c = CameraOrbitAnimator::new(Camera::default(), config, SeededSequence::new(6)).unwrap();

    assert_eq!(a.start(), b.start());
    assert_eq!(a.end(), b.end());
    assert_ne!(a.start(), c.start());
}

#[test]
fn test_scheduler_switches_each_period() {
    let config = SketchConfig::default()
        .with_particle_count(16 * 16)
        .with_orbit_period(5);
    let mut sketch = Sketch::new(&config, 42).unwrap();

    let reports: Vec<FrameReport> = (0..12).map(|_| sketch.render_frame()).collect();
    let switched: Vec<u64> = reports.iter().filter(|r| r.switched).map(|r| r.frame).collect();
    assert_eq!(switched, vec![0, 5, 10]);
    assert_eq!(reports[7].phase, 0.4);

    sketch.request_switch();
    assert!(sketch.render_frame().switched);
    assert!(sketch.field().check_finite().is_ok());
}

#[test]
fn test_sketch_is_reproducible() {
    let config = SketchConfig::default()
        .with_particle_count(16 * 16)
        .with_orbit_period(8)
        .with_seed(3);

    let mut a = Sketch::from_config(&config).unwrap();
    let mut b = Sketch::from_config(&config).unwrap();
    for _ in 0..20 {
        assert_eq!(a.render_frame(), b.render_frame());
    }
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.intensities(), b.intensities());
}

#[test]
fn test_field_stays_bounded_after_warmup() {
    let config = SketchConfig::default()
        .with_particle_count(16 * 16)
        .with_seed(1);
    let mut sketch = Sketch::from_config(&config).unwrap();
    sketch.warm_up();

    assert!(sketch.field().check_finite().is_ok());
    assert_eq!(sketch.field().step(), config.simulation.step);
    assert!(sketch.positions().iter().all(|p| p.length() < 4.5));
}

#[test]
fn test_grid_constraints() {
    assert!(matches!(
        ParticleField::from_seed(10, 0),
        Err(ConfigError::ParticleCountNotSquare { count: 10 })
    ));
    assert_eq!(grid_side(16).unwrap(), 4);

    let field = ParticleField::from_seed(16, 0).unwrap();
    assert_eq!(field.grid_coord(5), GridCoord { x: 1, y: 1 });
    assert_eq!(field.index_of(GridCoord { x: 1, y: 1 }), 5);
}

#[test]
fn test_seed_domain() {
    assert!(SeededSequence::try_from_seed(0).is_ok());
    assert!(SeededSequence::try_from_seed(u32::MAX as i64).is_ok());
    assert!(matches!(
        SeededSequence::try_from_seed(-1),
        Err(ConfigError::SeedOutOfRange(-1))
    ));
    assert!(SeededSequence::try_from_seed(u32::MAX as i64 + 1).is_err());
}

#[test]
fn test_load_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.toml");
    std::fs::write(
        &path,
        r#"
        [simulation]
        particle_count = 4096
        seed = 42
        orbit_period_frames = 120

        [render]
        alpha = 0.5
        "#,
    )
    .unwrap();

    let config = SketchConfig::load(&path).unwrap();
    assert_eq!(config.simulation.particle_count, 4096);
    assert_eq!(config.simulation.orbit_period_frames, 120);
    assert_eq!(config.render.alpha, 0.5);

    let sketch = Sketch::from_config(&config).unwrap();
    assert_eq!(sketch.seed(), 42);
    assert_eq!(sketch.field().side(), 64);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SketchConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
