use nalgebra::Point3;
use tracing::debug;

use super::body::BodyID;
use super::camera::CameraRig;
use super::focus::{focus_offset, CameraTransition, TransitionKind};
use super::scene::SceneGraph;

/// How much of the gap to a followed body the camera closes per frame.
pub const FOLLOW_LERP: f32 = 0.1;

/// Selection and camera-focus state, shared by input handling and the frame
/// update. There is exactly one of these per viewer.
///
/// The camera is busy while `transition` is set. A busy camera refuses new
/// flights; selection still changes.
#[derive(Debug, Clone)]
pub struct SceneState {
    selected: Option<BodyID>,
    focus_target: Option<BodyID>,
    transition: Option<CameraTransition>,
    original_camera_position: Point3<f32>,
}

impl SceneState {
    pub fn new(initial_camera_position: Point3<f32>) -> Self {
        SceneState {
            selected: None,
            focus_target: None,
            transition: None,
            original_camera_position: initial_camera_position,
        }
    }

    pub fn selected(&self) -> Option<BodyID> {
        self.selected
    }

    pub fn focus_target(&self) -> Option<BodyID> {
        self.focus_target
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn original_camera_position(&self) -> Point3<f32> {
        self.original_camera_position
    }

    pub fn panel_visible(&self) -> bool {
        self.selected.is_some()
    }

    /// Whether a camera flight is in progress at `now`.
    pub fn camera_animating(&self, now: f64) -> bool {
        self.transition.map_or(false, |t| t.is_active(now))
    }

    pub fn select(&mut self, body: BodyID) {
        debug!("Selected {:?}", body);
        self.selected = Some(body);
    }

    pub fn deselect(&mut self) {
        if let Some(body) = self.selected.take() {
            debug!("Deselected {:?}", body);
        }
    }

    /// Starts a flight to `body`. Returns false, changing nothing, if the
    /// camera is already flying.
    ///
    /// The camera position is remembered only when nothing was focused yet,
    /// so hopping from body to body still returns to the first view.
    pub fn focus_on(
        &mut self,
        scene: &SceneGraph,
        camera: &mut CameraRig,
        body: BodyID,
        now: f64,
    ) -> bool {
        self.settle(camera, now);
        if self.transition.is_some() {
            debug!("Camera busy, not focusing {:?}", body);
            return false;
        }

        if self.focus_target.is_none() {
            self.original_camera_position = camera.position();
        }
        self.focus_target = Some(body);

        let body_position = scene.body_world_position(body);
        let distance = scene.body(body).focus_class.distance();
        let destination = body_position + focus_offset(distance);
        camera.set_target(body_position);

        debug!("Focusing {:?}, flying to {}", body, destination);
        self.transition = Some(CameraTransition::new(
            now,
            camera.position(),
            destination,
            TransitionKind::Focus(body),
        ));
        true
    }

    /// Starts the flight back to the remembered view and re-centres the
    /// controls on the origin. Returns false if nothing is focused or the
    /// camera is already flying.
    pub fn reset_focus(&mut self, camera: &mut CameraRig, now: f64) -> bool {
        self.settle(camera, now);
        if self.transition.is_some() || self.focus_target.is_none() {
            return false;
        }

        camera.set_target(Point3::origin());

        debug!("Resetting camera to {}", self.original_camera_position);
        self.transition = Some(CameraTransition::new(
            now,
            camera.position(),
            self.original_camera_position,
            TransitionKind::Reset,
        ));
        true
    }

    /// Moves the camera for this frame: either along the current flight, or
    /// trailing the focused body at its focus distance.
    pub fn advance_camera(&mut self, scene: &SceneGraph, camera: &mut CameraRig, now: f64) {
        self.settle(camera, now);

        if let Some(transition) = &self.transition {
            camera.set_position(transition.sample(now));
            return;
        }

        let body = match self.focus_target {
            Some(body) => body,
            None => return,
        };

        let body_position = scene.body_world_position(body);
        camera.set_target(body_position);

        // Keep the current viewing direction, only fix up the distance
        let distance = scene.body(body).focus_class.distance();
        let direction = match (camera.position() - body_position).try_normalize(f32::EPSILON) {
            Some(direction) => direction,
            None => return,
        };
        let desired = body_position + direction * distance;
        let position = camera.position();
        camera.set_position(position + (desired - position) * FOLLOW_LERP);
    }

    /// Lands a flight whose time is up: snaps the camera to its destination
    /// and, for a reset, drops the focus.
    fn settle(&mut self, camera: &mut CameraRig, now: f64) {
        let transition = match self.transition {
            Some(t) if t.is_finished(now) => t,
            _ => return,
        };

        camera.set_position(transition.to);
        if transition.kind == TransitionKind::Reset {
            self.focus_target = None;
        }
        self.transition = None;
        debug!("Camera transition {:?} finished", transition.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::body::{BodyParams, FocusClass};
    use approx::assert_relative_eq;

    fn scene_with_planet() -> (SceneGraph, BodyID) {
        let mut scene = SceneGraph::new();
        let handle = scene.create_planet(BodyParams {
            radius: 0.5,
            texture: String::new(),
            distance_from_parent: 6.0,
            rotation_speed: 0.0,
            orbit_speed: 0.01,
        });
        scene.body_mut(handle.body).focus_class = FocusClass::GasGiant;
        (scene, handle.body)
    }

    #[test]
    fn test_focus_flight() {
        let (scene, jupiter) = scene_with_planet();
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(camera.position());

        assert!(state.focus_on(&scene, &mut camera, jupiter, 2.0));
        assert_eq!(camera.target(), Point3::new(6.0, 0.0, 0.0));
        assert!(state.camera_animating(2.0));
        assert!(state.camera_animating(2.9));

        state.advance_camera(&scene, &mut camera, 3.0);
        assert!(!state.camera_animating(3.0));
        assert!(state.transition().is_none());

        // Landed, then closed a tenth of the gap to exactly 2 units away
        let offset = focus_offset(2.0);
        let expected = Point3::new(6.0, 0.0, 0.0) + offset * (0.9 + 0.2 / offset.norm());
        assert_relative_eq!(camera.position(), expected, epsilon = 1e-5);
        assert_eq!(state.focus_target(), Some(jupiter));
    }

    #[test]
    fn test_busy_camera_refuses_focus() {
        let (scene, jupiter) = scene_with_planet();
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(camera.position());

        assert!(state.focus_on(&scene, &mut camera, jupiter, 0.0));
        let other = BodyID(99);
        assert!(!state.focus_on(&scene, &mut camera, other, 0.5));
        assert_eq!(state.focus_target(), Some(jupiter));
    }

    #[test]
    fn test_reset_needs_focus() {
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(camera.position());
        assert!(!state.reset_focus(&mut camera, 0.0));
        assert!(state.transition().is_none());
    }

    #[test]
    fn test_reset_returns_home() {
        let (scene, jupiter) = scene_with_planet();
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(Point3::origin());

        state.focus_on(&scene, &mut camera, jupiter, 0.0);
        assert_eq!(state.original_camera_position(), Point3::new(0.0, 5.0, 15.0));
        state.advance_camera(&scene, &mut camera, 1.5);

        // Refused while flying, accepted after
        assert!(state.reset_focus(&mut camera, 1.6));
        assert_eq!(camera.target(), Point3::origin());
        state.advance_camera(&scene, &mut camera, 2.0);
        assert_eq!(state.focus_target(), Some(jupiter));

        state.advance_camera(&scene, &mut camera, 2.7);
        assert_eq!(state.focus_target(), None);
        assert_eq!(camera.position(), Point3::new(0.0, 5.0, 15.0));
    }

    #[test]
    fn test_hopping_keeps_first_view() {
        let (mut scene, jupiter) = scene_with_planet();
        let saturn = scene
            .create_planet(BodyParams {
                radius: 0.4,
                texture: String::new(),
                distance_from_parent: 8.0,
                rotation_speed: 0.0,
                orbit_speed: 0.0,
            })
            .body;
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(Point3::origin());

        state.focus_on(&scene, &mut camera, jupiter, 0.0);
        state.advance_camera(&scene, &mut camera, 1.0);
        assert!(state.focus_on(&scene, &mut camera, saturn, 1.0));
        assert_eq!(state.original_camera_position(), Point3::new(0.0, 5.0, 15.0));
    }
}
