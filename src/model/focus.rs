use std::f32::consts::FRAC_PI_4;

use nalgebra::{Point3, Vector3};

use super::body::BodyID;
use crate::math::easing::ease_in_out_cubic;

/// Length of every camera flight, in seconds.
pub const TRANSITION_DURATION: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Flying in to look at a body
    Focus(BodyID),
    /// Flying back to where the camera was before the first focus
    Reset,
}

/// A camera flight, expressed as a pure function of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub start: f64,
    pub duration: f64,
    pub from: Point3<f32>,
    pub to: Point3<f32>,
    pub kind: TransitionKind,
}

impl CameraTransition {
    pub fn new(start: f64, from: Point3<f32>, to: Point3<f32>, kind: TransitionKind) -> Self {
        CameraTransition {
            start,
            duration: TRANSITION_DURATION,
            from,
            to,
            kind,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Fraction of the flight elapsed at `now`, clamped to [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// True on [start, end).
    pub fn is_active(&self, now: f64) -> bool {
        now >= self.start && now < self.end()
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Eased camera position at `now`.
    pub fn sample(&self, now: f64) -> Point3<f32> {
        let t = ease_in_out_cubic(self.progress(now)) as f32;
        self.from + (self.to - self.from) * t
    }
}

/// Where the camera parks relative to a focused body: up and off to the
/// side at 45 degrees, scaled by the body's focus distance.
pub fn focus_offset(distance: f32) -> Vector3<f32> {
    Vector3::new(FRAC_PI_4.cos(), 0.5, FRAC_PI_4.sin()) * distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flight() -> CameraTransition {
        CameraTransition::new(
            10.0,
            Point3::new(0.0, 5.0, 15.0),
            Point3::new(4.0, 1.0, -1.0),
            TransitionKind::Reset,
        )
    }

    #[test]
    fn test_endpoints() {
        let t = flight();
        assert_eq!(t.sample(10.0), t.from);
        assert_eq!(t.sample(11.0), t.to);
        // Clamped on both sides
        assert_eq!(t.sample(3.0), t.from);
        assert_eq!(t.sample(50.0), t.to);
    }

    #[test]
    fn test_midpoint_is_halfway() {
        let t = flight();
        assert_relative_eq!(t.sample(10.5), Point3::new(2.0, 3.0, 7.0), epsilon = 1e-5);
    }

    #[test]
    fn test_active_window() {
        let t = flight();
        assert!(!t.is_active(9.999));
        assert!(t.is_active(10.0));
        assert!(t.is_active(10.999));
        assert!(!t.is_active(11.0));

        assert!(!t.is_finished(10.999));
        assert!(t.is_finished(11.0));
    }

    #[test]
    fn test_focus_offset() {
        let offset = focus_offset(2.0);
        assert_relative_eq!(offset.x, 2.0_f32.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(offset.y, 1.0);
        assert_relative_eq!(offset.z, 2.0_f32.sqrt(), epsilon = 1e-6);
    }
}
