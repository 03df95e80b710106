//! Iris wander and pupil "breathing".
//!
//! Both are driven by one cyclic phase. The left iris traces
//! `(wx·sin θ, wy·cos θ)` and the right iris the rotated `(wy·cos θ, wx·sin θ)`,
//! so the eyes move together without mirroring each other exactly. The pupils
//! dilate in sync with `sin(2θ + 1) / 2`.

use std::f32::consts::TAU;

use crate::contour::Point;
use crate::geometry::EyeSide;

/// Discrete wander phase: `step` out of `steps` per full turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WanderPhase {
    step: u32,
    steps: u32,
}

impl WanderPhase {
    /// `steps` is clamped to at least one.
    pub fn new(steps: u32) -> Self {
        Self::at(0, steps)
    }

    pub fn at(step: u32, steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            step: step % steps,
            steps,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Phase angle in radians, in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        TAU * self.step as f32 / self.steps as f32
    }

    pub fn advance(&mut self) {
        self.step = (self.step + 1) % self.steps;
    }

    pub fn advanced(mut self) -> Self {
        self.advance();
        self
    }
}

/// Synchronized pupil dilation in `[-0.5, 0.5]`.
pub fn pupil_fraction(angle: f32) -> f32 {
    (2.0 * angle + 1.0).sin() / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WanderModel {
    pub wander_x: f32,
    pub wander_y: f32,
    pub iris_radius: f32,
    pub pupil_radius_min: f32,
    pub pupil_radius_max: f32,
}

impl Default for WanderModel {
    fn default() -> Self {
        Self {
            wander_x: 20.0,
            wander_y: 16.0,
            iris_radius: 28.0,
            pupil_radius_min: 12.0,
            pupil_radius_max: 22.0,
        }
    }
}

impl WanderModel {
    /// Iris displacement from the eye center.
    pub fn offset(&self, side: EyeSide, angle: f32) -> (f32, f32) {
        let (s, c) = angle.sin_cos();
        match side {
            EyeSide::Left => (self.wander_x * s, self.wander_y * c),
            EyeSide::Right => (self.wander_y * c, self.wander_x * s),
        }
    }

    pub fn iris_center(&self, side: EyeSide, eye_center: Point, angle: f32) -> Point {
        let (dx, dy) = self.offset(side, angle);
        eye_center.offset(dx, dy)
    }

    /// Pupil radius: `pupil_fraction` remapped to [0, 1] and spread between
    /// the minimum and maximum radius.
    pub fn pupil_radius(&self, angle: f32) -> f32 {
        let t = pupil_fraction(angle) + 0.5;
        self.pupil_radius_min + (self.pupil_radius_max - self.pupil_radius_min) * t
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn phase_wraps_after_a_full_cycle() {
        let start = WanderPhase::at(37, 100);
        let mut phase = start;
        for _ in 0..100 {
            phase.advance();
        }
        assert_eq!(phase, start);
    }

    #[test]
    fn zero_steps_is_clamped() {
        let mut phase = WanderPhase::new(0);
        assert_eq!(phase.steps(), 1);
        phase.advance();
        assert_eq!(phase.step(), 0);
        assert_eq!(phase.angle(), 0.0);
    }

    #[test]
    fn quarter_turn_offsets() {
        let model = WanderModel::default();
        let angle = WanderPhase::at(25, 100).angle();
        let (lx, ly) = model.offset(EyeSide::Left, angle);
        let (rx, ry) = model.offset(EyeSide::Right, angle);
        assert!((lx - 20.0).abs() < 1e-4 && ly.abs() < 1e-4);
        assert!(rx.abs() < 1e-4 && (ry - 20.0).abs() < 1e-4);
    }

    #[test]
    fn start_offsets() {
        let model = WanderModel::default();
        assert_eq!(model.offset(EyeSide::Left, 0.0), (0.0, 16.0));
        assert_eq!(model.offset(EyeSide::Right, 0.0), (16.0, 0.0));
        assert_eq!(
            model.iris_center(EyeSide::Left, Point::new(100.0, 50.0), 0.0),
            Point::new(100.0, 66.0)
        );
    }

    #[test]
    fn pupil_radius_spans_configured_range() {
        let model = WanderModel::default();
        let mut phase = WanderPhase::new(100);
        for _ in 0..100 {
            let r = model.pupil_radius(phase.angle());
            assert!((12.0 - 1e-4..=22.0 + 1e-4).contains(&r), "radius {r}");
            phase.advance();
        }
        // sin(2θ + 1) peaks at θ = (π/2 - 1) / 2
        let peak = (std::f32::consts::FRAC_PI_2 - 1.0) / 2.0;
        assert!((model.pupil_radius(peak) - 22.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn pupil_fraction_is_bounded_and_periodic(step in 0u32..1000, steps in 1u32..500) {
            let phase = WanderPhase::at(step, steps);
            let f = pupil_fraction(phase.angle());
            prop_assert!((-0.5..=0.5).contains(&f));

            let mut later = phase;
            for _ in 0..steps {
                later.advance();
            }
            prop_assert_eq!(later, phase);
            prop_assert!((pupil_fraction(later.angle()) - f).abs() < 1e-6);
        }
    }
}
