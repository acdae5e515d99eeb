use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Point3, Vector3};

use super::utils::draw_path;
use crate::math::path::path_iter_parametric;

const OUTLINE_SEGMENTS: usize = 64;

struct OutlineData {
    center: Point3<f32>,
    radius: f32,
    color: Point3<f32>,
}

/// Draws screen-facing circles around bodies, used to mark what the pointer
/// is over. Outlines only last one frame.
pub struct HighlightRenderer {
    line_renderer: LineRenderer,
    outlines: Vec<OutlineData>,
}

impl HighlightRenderer {
    pub fn new() -> Self {
        HighlightRenderer {
            line_renderer: LineRenderer::new(),
            outlines: vec![],
        }
    }

    pub fn add_outline(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.outlines.push(OutlineData {
            center,
            radius,
            color,
        });
    }

    fn load_outline_into_renderer(
        line_renderer: &mut LineRenderer,
        camera: &dyn Camera,
        outline: &OutlineData,
    ) {
        // Screen x and y, in world space
        let camera_transform = camera.view_transform().inverse();
        let x_vec = camera_transform.transform_vector(&Vector3::x()).normalize();
        let y_vec = camera_transform.transform_vector(&Vector3::y()).normalize();

        let f = |theta: f32| {
            let v = x_vec * theta.cos() + y_vec * theta.sin();
            outline.center + outline.radius * v
        };
        draw_path(
            line_renderer,
            path_iter_parametric(f, 0.0, std::f32::consts::TAU, OUTLINE_SEGMENTS),
            &outline.color,
        );
    }
}

impl Renderer for HighlightRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        for outline in self.outlines.iter() {
            Self::load_outline_into_renderer(&mut self.line_renderer, camera, outline);
        }
        self.line_renderer.render(pass, camera);
        self.outlines.clear();
    }
}
