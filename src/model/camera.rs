use std::f32::consts::PI;

use nalgebra::{Isometry3, Matrix4, Perspective3, Point2, Point3, Vector3};

use crate::math::ray::Ray;

const DEFAULT_FOVY_DEGREES: f32 = 75.0;
const DEFAULT_ZNEAR: f32 = 0.1;
const DEFAULT_ZFAR: f32 = 1000.0;
const DEFAULT_MIN_DISTANCE: f32 = 2.0;
const DEFAULT_MAX_DISTANCE: f32 = 40.0;
const DEFAULT_DAMPING: f32 = 0.05;

// Keeps the camera off the poles, where look_at loses its up direction
const PHI_LIMIT: f32 = 1e-3;
// Leftover motion below this is dropped
const MOTION_EPSILON: f32 = 1e-6;

/// Perspective camera with damped orbit controls around a movable target.
///
/// User input (`rotate`, `pan`, `zoom`) only queues motion. `update_controls`
/// applies a `damping` fraction of it each frame and leaves the rest for
/// later frames, which gives the camera its glide. Direct writes to the
/// position or target take effect immediately.
///
/// Zooming is clamped to the distance limits. Positions written directly are
/// not, so focus transitions can park the camera closer than a user could.
#[derive(Debug, Clone)]
pub struct CameraRig {
    // -- placement --
    position: Point3<f32>,
    target: Point3<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- controls --
    damping: f32,
    distance_limits: (f32, f32),
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vector3<f32>,
    pending_scale: f32,
}

impl CameraRig {
    pub fn new(position: Point3<f32>) -> Self {
        CameraRig {
            position,
            target: Point3::origin(),
            width: 800,
            height: 600,
            fovy: DEFAULT_FOVY_DEGREES.to_radians(),
            znear: DEFAULT_ZNEAR,
            zfar: DEFAULT_ZFAR,
            damping: DEFAULT_DAMPING,
            distance_limits: (DEFAULT_MIN_DISTANCE, DEFAULT_MAX_DISTANCE),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vector3::zeros(),
            pending_scale: 1.0,
        }
    }

    pub fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy;
    }

    pub fn set_clip_planes(&mut self, znear: f32, zfar: f32) {
        self.znear = znear;
        self.zfar = zfar;
    }

    /// Zoom range. The pair is taken in either order.
    pub fn set_distance_limits(&mut self, min: f32, max: f32) {
        self.distance_limits = (min.min(max), min.max(max));
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn set_target(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    pub fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fovy, self.znear, self.zfar)
    }

    pub fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.position, &self.target, &Vector3::y())
    }

    pub fn transformation(&self) -> Matrix4<f32> {
        self.projection().into_inner() * self.view_transform().to_homogeneous()
    }

    /// Queues an orbit around the target: `dtheta` around the vertical axis,
    /// `dphi` towards the poles.
    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.pending_theta += dtheta;
        self.pending_phi += dphi;
    }

    /// Queues a pan by a drag of (`dx`, `dy`) pixels. Target and camera move
    /// together, parallel to the screen.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let world_per_pixel = 2.0 * self.distance() * (self.fovy / 2.0).tan() / self.height as f32;
        let camera_to_world = self.view_transform().inverse();
        let right = camera_to_world * Vector3::x();
        let up = camera_to_world * Vector3::y();
        self.pending_pan += (up * dy - right * dx) * world_per_pixel;
    }

    /// Queues a change in distance to the target. Factors below one move in.
    pub fn zoom(&mut self, factor: f32) {
        self.pending_scale *= factor;
    }

    pub fn is_moving(&self) -> bool {
        self.pending_theta != 0.0
            || self.pending_phi != 0.0
            || self.pending_pan != Vector3::zeros()
            || self.pending_scale != 1.0
    }

    /// Applies one frame's share of queued motion. Returns whether the
    /// camera moved; an idle rig is left untouched.
    pub fn update_controls(&mut self) -> bool {
        if !self.is_moving() {
            return false;
        }

        let offset = self.position - self.target;
        let mut radius = offset.norm();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        theta += self.pending_theta * self.damping;
        phi = (phi + self.pending_phi * self.damping).clamp(PHI_LIMIT, PI - PHI_LIMIT);

        if self.pending_scale != 1.0 {
            let (min, max) = self.distance_limits;
            radius = (radius * self.pending_scale).clamp(min, max);
            self.pending_scale = 1.0;
        }

        self.target += self.pending_pan * self.damping;

        let offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        self.position = self.target + offset;

        let decay = 1.0 - self.damping;
        self.pending_theta *= decay;
        self.pending_phi *= decay;
        self.pending_pan *= decay;
        if self.pending_theta.abs() < MOTION_EPSILON {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < MOTION_EPSILON {
            self.pending_phi = 0.0;
        }
        if self.pending_pan.norm() < MOTION_EPSILON {
            self.pending_pan = Vector3::zeros();
        }

        true
    }

    /// Converts window coordinates (pixels, origin top-left) to normalized
    /// device coordinates.
    pub fn window_to_ndc(&self, x: f32, y: f32) -> Point2<f32> {
        Point2::new(
            x / self.width as f32 * 2.0 - 1.0,
            -(y / self.height as f32 * 2.0 - 1.0),
        )
    }

    /// Ray from the eye through a point given in normalized device
    /// coordinates. None if the camera is degenerate (e.g. eye on target).
    pub fn ray_through_ndc(&self, ndc: Point2<f32>) -> Option<Ray> {
        let inverse = self.transformation().try_inverse()?;
        let far = inverse.transform_point(&Point3::new(ndc.x, ndc.y, 1.0));
        let ray = Ray::through(self.position, far);
        if ray.dir.iter().all(|c| c.is_finite()) {
            Some(ray)
        } else {
            None
        }
    }

    pub fn ray_through_window(&self, x: f32, y: f32) -> Option<Ray> {
        self.ray_through_ndc(self.window_to_ndc(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_ray_hits_target() {
        let mut rig = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        rig.set_viewport(1280, 720);
        let ray = rig.ray_through_window(640.0, 360.0).unwrap();

        let expected = (Point3::origin() - rig.position()).normalize();
        assert_relative_eq!(ray.dir.into_inner(), expected, epsilon = 1e-4);
        assert_eq!(ray.origin, rig.position());
    }

    #[test]
    fn test_window_to_ndc() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.set_viewport(200, 100);
        assert_eq!(rig.window_to_ndc(0.0, 0.0), Point2::new(-1.0, 1.0));
        assert_eq!(rig.window_to_ndc(200.0, 100.0), Point2::new(1.0, -1.0));
        assert_eq!(rig.window_to_ndc(100.0, 50.0), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_corner_ray_leans_right() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.set_viewport(100, 100);
        let ray = rig.ray_through_ndc(Point2::new(1.0, 0.0)).unwrap();
        assert!(ray.dir.x > 0.0);
        assert!(ray.dir.z < 0.0);
        assert_relative_eq!(ray.dir.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_idle_update_is_noop() {
        let mut rig = CameraRig::new(Point3::new(0.3, 5.0, 15.0));
        assert!(!rig.update_controls());
        assert_eq!(rig.position(), Point3::new(0.3, 5.0, 15.0));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.zoom(0.01);
        rig.update_controls();
        assert_relative_eq!(rig.distance(), 2.0, epsilon = 1e-4);

        rig.zoom(1000.0);
        rig.update_controls();
        assert_relative_eq!(rig.distance(), 40.0, epsilon = 1e-3);
    }

    #[test]
    fn test_direct_placement_not_clamped() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.set_position(Point3::new(0.0, 0.0, 1.0));
        rig.update_controls();
        assert_relative_eq!(rig.distance(), 1.0);
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.rotate(1.0, 0.0);

        // First frame only takes the damping share
        rig.update_controls();
        let first = rig.position().x.atan2(rig.position().z);
        assert_relative_eq!(first, 0.05, epsilon = 1e-4);

        // Eventually the whole rotation is applied, at constant distance
        while rig.update_controls() {}
        let total = rig.position().x.atan2(rig.position().z);
        assert_relative_eq!(total, 1.0, epsilon = 1e-3);
        assert_relative_eq!(rig.distance(), 10.0, epsilon = 1e-3);
        assert!(!rig.is_moving());
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.set_viewport(100, 100);
        rig.pan(-10.0, 0.0);
        while rig.update_controls() {}

        // Dragging left moves the view right
        assert!(rig.target().x > 0.0);
        assert_relative_eq!(rig.target().y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(rig.position().x, rig.target().x, epsilon = 1e-4);
        assert_relative_eq!(rig.distance(), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_phi_stays_off_the_pole() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.rotate(0.0, -50.0);
        while rig.update_controls() {}
        assert!(rig.position().y < 10.0);
        assert!(rig.position().y > 9.99);
    }

    #[test]
    fn test_reversed_limits_still_clamp() {
        let mut rig = CameraRig::new(Point3::new(0.0, 0.0, 10.0));
        rig.set_distance_limits(1.5, 0.5);
        rig.zoom(0.9);
        while rig.update_controls() {}
        assert_relative_eq!(rig.distance(), 1.5, epsilon = 1e-4);
    }
}
