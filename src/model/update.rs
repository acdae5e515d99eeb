use nalgebra::Vector3;
use tracing::trace;

use super::camera::CameraRig;
use super::solar_system::SolarSystem;
use super::state::SceneState;

/// Relative amplitude of the glow shell's breathing.
pub const GLOW_PULSE_AMPLITUDE: f64 = 0.02;
/// Angular frequency of the breathing along X, Y and Z, per second.
pub const GLOW_PULSE_FREQUENCIES: [f64; 3] = [0.6, 0.7, 0.8];

/// Runs one frame of the simulation at wall-clock time `now` (seconds since
/// start). Everything moves before the camera, so the camera follows
/// where bodies are this frame, not the last.
pub fn advance_frame(
    system: &mut SolarSystem,
    state: &mut SceneState,
    camera: &mut CameraRig,
    now: f64,
) {
    let respawned = system.meteors.advance();
    if respawned > 0 {
        trace!("{} meteors respawned", respawned);
    }

    advance_sun(system, now);
    advance_planets(system);
    advance_moon(system, now);

    state.advance_camera(&system.scene, camera, now);
    camera.update_controls();
}

pub fn glow_scale(now: f64) -> Vector3<f32> {
    let [x, y, z] =
        GLOW_PULSE_FREQUENCIES.map(|k| (1.0 + (now * k).sin() * GLOW_PULSE_AMPLITUDE) as f32);
    Vector3::new(x, y, z)
}

/// Spins the sun by its fixed step and lets the glow shell breathe.
pub fn advance_sun(system: &mut SolarSystem, now: f64) {
    let sun = system.sun;
    let step = system.scene.body(sun).params.rotation_speed;
    system.scene.advance_spin(sun, step);
    system.scene.node_mut(system.glow).scale = glow_scale(now);
}

/// Spins every planet and turns its orbit container, one fixed step each.
pub fn advance_planets(system: &mut SolarSystem) {
    for handle in system.planets.iter() {
        let params = &system.scene.body(handle.body).params;
        let (spin, orbit) = (params.rotation_speed, params.orbit_speed);
        system.scene.advance_spin(handle.body, spin);
        system.scene.advance_orbit(handle.orbit_container, orbit);
    }
}

/// Spins the moon one step, then places it on its circle around the earth
/// from the wall clock alone.
pub fn advance_moon(system: &mut SolarSystem, now: f64) {
    let moon = system.moon;
    let params = &system.scene.body(moon).params;
    let (spin, speed, distance) = (
        params.rotation_speed,
        params.orbit_speed,
        params.distance_from_parent,
    );
    system.scene.advance_spin(moon, spin);

    let angle = now * speed;
    let node = system.scene.body(moon).node;
    system.scene.node_mut(node).translation = Vector3::new(
        angle.cos() as f32 * distance,
        0.0,
        angle.sin() as f32 * distance,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{self, EARTH, MOON, SATURN, SUN};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_glow_breathes_per_axis() {
        assert_eq!(glow_scale(0.0), Vector3::repeat(1.0));
        let scale = glow_scale(2.0);
        assert_relative_eq!(scale.x, 1.0 + 0.02 * (1.2_f64).sin() as f32, epsilon = 1e-6);
        assert!(scale.x != scale.y && scale.y != scale.z);
        for t in [0.3, 5.0, 123.4] {
            assert!(glow_scale(t).iter().all(|s| (0.98..=1.02).contains(s)));
        }
    }

    #[test]
    fn test_sun_spins_fixed_step() {
        let mut system = SolarSystem::build(0, 1);
        for i in 0..10 {
            advance_sun(&mut system, i as f64);
        }
        assert_relative_eq!(system.scene.body(SUN).spin_angle, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_planets_advance_per_frame() {
        let mut system = SolarSystem::build(0, 1);
        for _ in 0..25 {
            advance_planets(&mut system);
        }
        let spec = catalog::spec(SATURN);
        let handle = system.planets[5];
        assert_eq!(handle.body, SATURN);
        assert_relative_eq!(
            system.scene.body(SATURN).spin_angle,
            25.0 * spec.rotation_speed,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            system.scene.orbit_angle(handle.orbit_container).unwrap(),
            25.0 * spec.orbit_speed,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_moon_follows_the_clock() {
        let mut system = SolarSystem::build(0, 1);
        advance_moon(&mut system, 50.0);

        let angle = 50.0 * catalog::spec(MOON).orbit_speed;
        let node = system.scene.body(MOON).node;
        let local = system.scene.node(node).translation;
        assert_relative_eq!(local.x, 0.5 * angle.cos() as f32, epsilon = 1e-6);
        assert_relative_eq!(local.y, 0.0);
        assert_relative_eq!(local.z, 0.5 * angle.sin() as f32, epsilon = 1e-6);

        // Still rides along with the earth
        let earth = system.scene.body_world_position(EARTH);
        let moon = system.scene.body_world_position(MOON);
        assert_relative_eq!((moon - earth).norm(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_idle_frame_leaves_camera_alone() {
        let mut system = SolarSystem::build(5, 1);
        let mut camera = CameraRig::new(Point3::new(0.0, 5.0, 15.0));
        let mut state = SceneState::new(camera.position());
        advance_frame(&mut system, &mut state, &mut camera, 0.016);
        assert_eq!(camera.position(), Point3::new(0.0, 5.0, 15.0));
        assert_eq!(camera.target(), Point3::origin());
    }
}
