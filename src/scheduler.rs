//! Frame scheduling: when to switch the camera, which phase to show, and
//! the optional warm-up that settles the field before the first frame.
//!
//! The scheduler advances in logical frames, never wall-clock time. One
//! frame is one `evaluate` plus one `tick`.

use glam::Vec3;
use tracing::{debug, info};

use crate::camera::CameraOrbitAnimator;
use crate::field::ParticleField;

/// Ticks per warm-up round.
pub const TICKS_PER_ROUND: u32 = 60;

/// Outcome of a single scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Index of the frame just produced.
    pub frame: u64,
    /// Orbit phase in `[0, 1)`.
    pub phase: f32,
    /// Whether the camera switched at the start of this frame.
    pub switched: bool,
    /// Eye position used for this frame.
    pub eye: Vec3,
}

/// Drives the field and the camera once per rendered frame.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    frame: u64,
    period: u64,
    switch_requested: bool,
}

impl FrameScheduler {
    /// Create a scheduler whose orbit lasts `period` frames.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: u64) -> Self {
        assert!(period > 0, "Orbit period must be at least one frame");
        Self {
            frame: 0,
            period,
            switch_requested: false,
        }
    }

    /// Index of the next frame.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames per orbit.
    #[inline]
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Orbit phase of the next frame.
    #[inline]
    pub fn phase(&self) -> f32 {
        (self.frame % self.period) as f32 / self.period as f32
    }

    /// Whether the next frame starts a new orbit.
    #[inline]
    pub fn at_period_boundary(&self) -> bool {
        self.frame % self.period == 0
    }

    /// Ask for a camera switch at the start of the next frame.
    ///
    /// This is the hook for an external trigger such as a key press.
    pub fn request_switch(&mut self) {
        self.switch_requested = true;
    }

    /// Produce one frame: switch if due, place the camera, tick the field.
    pub fn advance(
        &mut self,
        field: &mut ParticleField,
        animator: &mut CameraOrbitAnimator,
    ) -> FrameReport {
        let switched = self.at_period_boundary() || self.switch_requested;
        if switched {
            animator.switch();
            self.switch_requested = false;
        }

        let phase = self.phase();
        let eye = animator.evaluate(phase);
        field.tick();

        let report = FrameReport {
            frame: self.frame,
            phase,
            switched,
            eye,
        };
        self.frame += 1;
        report
    }
}

/// Fast settling schedule run before the first frame.
///
/// A short burst at a large step spreads the particles along the flow,
/// then several rounds at the nominal step smooth out the artifacts of
/// the burst. The field is left at the nominal step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Warmup {
    /// Step used for the burst.
    pub warmup_step: f32,
    /// Ticks in the burst.
    pub warmup_ticks: u32,
    /// Step used afterwards and left in effect.
    pub nominal_step: f32,
    /// Rounds of [`TICKS_PER_ROUND`] ticks at the nominal step.
    pub rounds: u32,
}

impl Warmup {
    /// Total ticks the schedule performs.
    pub fn total_ticks(&self) -> u64 {
        self.warmup_ticks as u64 + self.rounds as u64 * TICKS_PER_ROUND as u64
    }

    /// Run the schedule on `field`.
    pub fn run(&self, field: &mut ParticleField) {
        info!(
            ticks = self.total_ticks(),
            warmup_step = self.warmup_step,
            nominal_step = self.nominal_step,
            "warming up particle field"
        );

        field.set_step(self.warmup_step);
        for _ in 0..self.warmup_ticks {
            field.tick();
        }

        field.set_step(self.nominal_step);
        for round in 0..self.rounds {
            for _ in 0..TICKS_PER_ROUND {
                field.tick();
            }
            debug!(round = round + 1, of = self.rounds, "warm-up round finished");
        }
    }
}
