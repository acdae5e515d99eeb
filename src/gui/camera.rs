use std::f32::consts::TAU;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Point3, Vector2};

use crate::model::camera::CameraRig;

// Each scroll notch moves this fraction of the way in
const ZOOM_RATIO: f32 = 0.95;

/// Binds pointer input to a `CameraRig`: left drag orbits, right drag pans,
/// the wheel zooms. Motion is only queued here; the rig applies it when the
/// frame update calls `update_controls`.
pub struct OrbitCamera {
    pub rig: CameraRig,
    last_cursor_pos: Vector2<f32>,
}

impl OrbitCamera {
    pub fn new(rig: CameraRig) -> Self {
        OrbitCamera {
            rig,
            last_cursor_pos: Vector2::zeros(),
        }
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;
                let height = self.rig.viewport().1 as f32;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // A drag across the full height is one full turn
                    self.rig.rotate(-TAU * dpos.x / height, -TAU * dpos.y / height);
                } else if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.rig.pan(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off > 0.0 {
                    self.rig.zoom(ZOOM_RATIO);
                } else if off < 0.0 {
                    self.rig.zoom(ZOOM_RATIO.recip());
                }
            }
            WindowEvent::FramebufferSize(w, h) => {
                self.rig.set_viewport(w, h);
            }
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.rig.position()
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.rig.view_transform()
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.rig.transformation()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.rig
            .transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        self.rig.clip_planes()
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.rig.projection().into_inner());
        view.upload(&self.rig.view_transform().to_homogeneous());
    }
}
