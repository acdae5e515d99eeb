use nalgebra::Point2;
use tracing::trace;

use super::body::BodyID;
use super::camera::CameraRig;
use super::panel::PanelLayout;
use super::scene::{RingID, SceneGraph};
use super::solar_system::SolarSystem;
use super::state::SceneState;
use crate::math::ray::Ray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Body(BodyID),
    Ring(RingID),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub target: HitTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A body was hit. `focused` says whether a camera flight started; it
    /// doesn't while another flight is underway.
    Selected { body: BodyID, focused: bool },
    /// Empty space was hit while something was selected
    Deselected,
    /// Empty space was hit and nothing was selected
    Ignored,
    /// The panel's close button was pressed
    PanelClosed,
    /// The click landed on the panel and went no further
    OnPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Pointer(BodyID),
    Default,
}

/// Nearest body sphere or ring annulus along the ray. Only nodes still in
/// the scene are tested.
pub fn pick(scene: &SceneGraph, ray: &Ray) -> Option<Hit> {
    let bodies = scene
        .bodies()
        .filter(|body| scene.is_in_scene(body.node))
        .filter_map(|body| {
            let center = scene.world_position(body.node);
            ray.intersect_sphere(&center, body.params.radius)
                .map(|distance| Hit {
                    distance,
                    target: HitTarget::Body(body.id),
                })
        });

    let rings = scene
        .rings()
        .filter(|ring| scene.is_in_scene(ring.node))
        .filter_map(|ring| {
            let transform = scene.world_isometry(ring.node);
            ray.intersect_annulus(
                &transform,
                ring.params.inner_radius,
                ring.params.outer_radius,
            )
            .map(|distance| Hit {
                distance,
                target: HitTarget::Ring(ring.id),
            })
        });

    bodies
        .chain(rings)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Walks from whatever was hit up to the first body with an info record.
pub fn resolve(system: &SolarSystem, target: HitTarget) -> Option<BodyID> {
    let mut body = match target {
        HitTarget::Body(body) => body,
        HitTarget::Ring(ring) => system.scene.ring(ring).owner,
    };
    loop {
        if system.info.contains(body) {
            return Some(body);
        }
        body = system.parent_of(body)?;
    }
}

fn pick_body(system: &SolarSystem, ray: Option<&Ray>) -> Option<BodyID> {
    let hit = pick(&system.scene, ray?)?;
    resolve(system, hit.target)
}

/// Applies a click along `ray`. A hit selects the body and starts a flight
/// to it; a miss with a selection clears it and flies back home.
///
/// A `None` ray (degenerate camera) counts as a miss.
pub fn handle_click(
    system: &SolarSystem,
    state: &mut SceneState,
    camera: &mut CameraRig,
    ray: Option<&Ray>,
    now: f64,
) -> ClickOutcome {
    match pick_body(system, ray) {
        Some(body) => {
            state.select(body);
            let focused = state.focus_on(&system.scene, camera, body, now);
            ClickOutcome::Selected { body, focused }
        }
        None if state.selected().is_some() => {
            state.deselect();
            state.reset_focus(camera, now);
            ClickOutcome::Deselected
        }
        None => ClickOutcome::Ignored,
    }
}

/// A primary click at window position `cursor`. The info panel, when shown,
/// gets the click first; only clicks outside it are cast into the scene.
pub fn handle_pointer(
    system: &SolarSystem,
    state: &mut SceneState,
    camera: &mut CameraRig,
    panel: Option<&PanelLayout>,
    cursor: Point2<f32>,
    now: f64,
) -> ClickOutcome {
    if let Some(panel) = panel {
        if panel.close_hit(cursor.x, cursor.y) {
            state.deselect();
            state.reset_focus(camera, now);
            return ClickOutcome::PanelClosed;
        }
        if panel.contains(cursor.x, cursor.y) {
            return ClickOutcome::OnPanel;
        }
    }

    let ray = camera.ray_through_window(cursor.x, cursor.y);
    handle_click(system, state, camera, ray.as_ref(), now)
}

/// Same test as a click, but only reports what is under the pointer.
pub fn cursor_hint(system: &SolarSystem, ray: Option<&Ray>) -> CursorHint {
    match pick_body(system, ray) {
        Some(body) => {
            trace!("Pointer over {:?}", body);
            CursorHint::Pointer(body)
        }
        None => CursorHint::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{EARTH, MOON, SATURN, SUN};
    use crate::model::focus::TransitionKind;
    use nalgebra::{Point3, Vector3};

    fn system() -> SolarSystem {
        SolarSystem::build(0, 3)
    }

    #[test]
    fn test_pick_sun_from_above() {
        let system = system();
        let ray = Ray::new(Point3::new(0.0, 10.0, 0.0), -Vector3::y());
        let hit = pick(&system.scene, &ray).unwrap();
        assert_eq!(hit.target, HitTarget::Body(SUN));
        assert!((hit.distance - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_hit_wins() {
        let system = system();
        // Sweeping inwards along the X axis from just outside the moon:
        // moon, earth, venus, mercury and the sun all lie on the ray
        let ray = Ray::new(Point3::new(4.2, 0.0, 0.0), -Vector3::x());
        let hit = pick(&system.scene, &ray).unwrap();
        assert_eq!(hit.target, HitTarget::Body(MOON));
        assert_eq!(resolve(&system, hit.target), Some(MOON));

        let ray = Ray::new(Point3::new(3.9, 0.0, 0.0), -Vector3::x());
        let hit = pick(&system.scene, &ray).unwrap();
        assert_eq!(hit.target, HitTarget::Body(EARTH));
    }

    #[test]
    fn test_ring_resolves_to_owner() {
        let system = system();
        let ring = system.scene.rings().find(|r| r.owner == SATURN).unwrap().id;
        assert_eq!(resolve(&system, HitTarget::Ring(ring)), Some(SATURN));
    }

    #[test]
    fn test_miss_with_nothing_selected_is_ignored() {
        let system = system();
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(camera.position());
        let ray = Ray::new(Point3::new(0.0, 5.0, 15.0), Vector3::y());

        for i in 0..3 {
            let outcome = handle_click(&system, &mut state, &mut camera, Some(&ray), i as f64);
            assert_eq!(outcome, ClickOutcome::Ignored);
        }
        assert_eq!(state.selected(), None);
        assert!(state.transition().is_none());
        assert_eq!(camera.target(), Point3::origin());
    }

    #[test]
    fn test_click_during_flight_selects_but_keeps_focus() {
        let system = system();
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(camera.position());

        let down = -Vector3::y();
        let at_sun = Ray::new(Point3::new(0.0, 10.0, 0.0), down);
        let at_saturn = Ray::new(Point3::new(8.0, 10.0, 0.0), down);

        let first = handle_click(&system, &mut state, &mut camera, Some(&at_sun), 0.0);
        assert_eq!(first, ClickOutcome::Selected { body: SUN, focused: true });

        let second = handle_click(&system, &mut state, &mut camera, Some(&at_saturn), 0.5);
        assert_eq!(second, ClickOutcome::Selected { body: SATURN, focused: false });
        assert_eq!(state.selected(), Some(SATURN));
        assert_eq!(state.focus_target(), Some(SUN));
    }

    #[test]
    fn test_cursor_hint() {
        let system = system();
        let hit = Ray::new(Point3::new(0.0, 10.0, 0.0), -Vector3::y());
        let miss = Ray::new(Point3::new(0.0, 10.0, 0.0), Vector3::y());
        assert_eq!(cursor_hint(&system, Some(&hit)), CursorHint::Pointer(SUN));
        assert_eq!(cursor_hint(&system, Some(&miss)), CursorHint::Default);
        assert_eq!(cursor_hint(&system, None), CursorHint::Default);
    }

    fn earth_panel(system: &SolarSystem) -> PanelLayout {
        PanelLayout::new(system.info.get(EARTH).unwrap(), (1280, 720), 1.0)
    }

    fn focus_earth(system: &SolarSystem) -> (SceneState, CameraRig) {
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        camera.set_viewport(1280, 720);
        let mut state = SceneState::new(camera.position());
        let at_earth = Ray::new(Point3::new(3.5, 10.0, 0.0), -Vector3::y());
        handle_click(system, &mut state, &mut camera, Some(&at_earth), 0.0);
        (state, camera)
    }

    #[test]
    fn test_close_button_deselects_and_flies_home() {
        let system = system();
        let (mut state, mut camera) = focus_earth(&system);
        let panel = earth_panel(&system);

        let outcome = handle_pointer(
            &system,
            &mut state,
            &mut camera,
            Some(&panel),
            panel.close_button.center(),
            2.0,
        );
        assert_eq!(outcome, ClickOutcome::PanelClosed);
        assert_eq!(state.selected(), None);
        assert_eq!(state.transition().unwrap().kind, TransitionKind::Reset);
        assert_eq!(state.transition().unwrap().to, Point3::new(0.0, 5.0, 15.0));
        assert_eq!(camera.target(), Point3::origin());
    }

    #[test]
    fn test_clicks_on_panel_stay_there() {
        let system = system();
        let (mut state, mut camera) = focus_earth(&system);
        let panel = earth_panel(&system);
        let inside = Point2::new(panel.rect.x + 5.0, panel.rect.y + 5.0);

        let outcome = handle_pointer(&system, &mut state, &mut camera, Some(&panel), inside, 2.0);
        assert_eq!(outcome, ClickOutcome::OnPanel);
        assert_eq!(state.selected(), Some(EARTH));
        assert_eq!(state.focus_target(), Some(EARTH));
    }

    #[test]
    fn test_clicks_off_panel_reach_the_scene() {
        let system = system();
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        camera.set_viewport(1280, 720);
        let mut state = SceneState::new(camera.position());

        // The window centre looks straight at the sun
        let centre = Point2::new(640.0, 360.0);
        let outcome = handle_pointer(&system, &mut state, &mut camera, None, centre, 0.0);
        assert_eq!(outcome, ClickOutcome::Selected { body: SUN, focused: true });
    }
}
