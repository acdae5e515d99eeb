use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::config::Config;

mod camera;
mod controller;
mod overlay;
mod renderers;
mod skybox;
mod view;

/// The interactive viewer: one `View` of the solar system, driven by the
/// window's event stream and a wall clock.
pub struct Explorer {
    view: View,
    controller: Controller,
    start: Instant,
}

impl Explorer {
    pub fn new(window: &mut Window, config: &Config, seed: u64) -> Self {
        Self {
            view: View::new(window, config, seed),
            controller: Controller::new(),
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn process_user_input(&mut self, mut events: EventManager, now: f64) {
        for event in events.iter() {
            self.controller.process_event(event, &mut self.view, now);
        }
    }
}

impl State for Explorer {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        let now = self.elapsed();
        self.process_user_input(window.events(), now);
        self.view.update(now);
        self.view.prerender_scene(window);
        self.controller.count_frame(now);
    }
}
