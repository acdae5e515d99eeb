use kiss3d::camera::Camera;
use kiss3d::renderer::{PointRenderer, Renderer};
use nalgebra::Point3;

use self::highlight_renderer::HighlightRenderer;
use self::orbit_renderer::OrbitRenderer;
use crate::model::starfield::Starfield;

mod highlight_renderer;
mod orbit_renderer;
mod utils;

pub struct CompoundRenderer {
    highlight_renderer: HighlightRenderer,
    orbit_renderer: OrbitRenderer,
    point_renderer: PointRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            highlight_renderer: HighlightRenderer::new(),
            orbit_renderer: OrbitRenderer::new(),
            point_renderer: PointRenderer::new(),
        }
    }

    /// Orbit paths persist across frames; add each one once.
    pub fn add_orbit_path(&mut self, points: &[Point3<f32>], color: Point3<f32>) {
        self.orbit_renderer.add_path(points, color);
    }

    pub fn draw_highlight(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.highlight_renderer.add_outline(center, radius, color);
    }

    /// Queues the starfield for this frame, centred on the eye so it stays
    /// at infinity.
    pub fn draw_stars(&mut self, starfield: &Starfield, eye: Point3<f32>) {
        for (position, color) in starfield.positions_around(eye) {
            self.point_renderer.draw_point(position, color);
        }
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.point_renderer.render(pass, camera);
        self.orbit_renderer.render(pass, camera);
        self.highlight_renderer.render(pass, camera);
    }
}
