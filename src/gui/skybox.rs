use std::f32::consts::{FRAC_PI_2, PI};

use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

/// Half the edge of the sky cube. The corners must stay inside the far
/// clipping plane.
pub const SKYBOX_HALF_SIZE: f32 = 500.0;

/// Where each face of the sky cube sits relative to the eye, in +X, -X, +Y,
/// -Y, +Z, -Z order. Faces are quads in their local XY plane, turned to face
/// the centre.
pub fn face_placements(half_size: f32) -> [Isometry3<f32>; 6] {
    let face = |offset: Vector3<f32>, axis: Vector3<f32>, angle: f32| {
        Isometry3::from_parts(
            Translation3::from(offset * half_size),
            UnitQuaternion::from_scaled_axis(axis * angle),
        )
    };

    [
        face(Vector3::x(), Vector3::y(), -FRAC_PI_2),
        face(-Vector3::x(), Vector3::y(), FRAC_PI_2),
        face(Vector3::y(), Vector3::x(), FRAC_PI_2),
        face(-Vector3::y(), Vector3::x(), -FRAC_PI_2),
        face(Vector3::z(), Vector3::y(), PI),
        face(-Vector3::z(), Vector3::y(), 0.0),
    ]
}

/// Camera-centred cube carrying the six sky images. Faces stay black until
/// their texture arrives.
pub struct Skybox {
    root: SceneNode,
    faces: Vec<SceneNode>,
}

impl Skybox {
    pub fn new(window: &mut Window) -> Self {
        let mut root = window.add_group();
        let size = 2.0 * SKYBOX_HALF_SIZE;
        let faces = face_placements(SKYBOX_HALF_SIZE)
            .iter()
            .map(|placement| {
                let mut face = root.add_quad(size, size, 1, 1);
                face.set_local_transformation(*placement);
                face.set_color(0.0, 0.0, 0.0);
                face.enable_backface_culling(false);
                face
            })
            .collect();

        Skybox { root, faces }
    }

    pub fn follow(&mut self, eye: Point3<f32>) {
        self.root
            .set_local_translation(Translation3::from(eye.coords));
    }

    pub fn apply_texture(&mut self, face: usize, bytes: &[u8], name: &str) {
        if let Some(node) = self.faces.get_mut(face) {
            node.set_color(1.0, 1.0, 1.0);
            node.set_texture_from_memory(bytes, name);
        }
    }
}
