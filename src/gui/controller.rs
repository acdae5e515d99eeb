use kiss3d::event::{Action, Event, MouseButton, WindowEvent};
use nalgebra::Point2;
use tracing::debug;

use super::view::View;

/// A press and release closer than this (in pixels) is a click; anything
/// longer was a drag for the camera.
pub const CLICK_TOLERANCE: f32 = 5.0;

// Seconds between frame rate reports
const FPS_WINDOW: f64 = 5.0;

pub struct Controller {
    cursor: Point2<f32>,
    press_origin: Option<Point2<f32>>,
    frame_rate: FrameRate,
}

/// Average frame rate over fixed reporting windows, fed with the same
/// wall-clock seconds as the rest of the frame.
pub struct FrameRate {
    window: f64,
    window_start: Option<f64>,
    frames: u32,
}

impl FrameRate {
    pub fn new(window: f64) -> Self {
        FrameRate {
            window,
            window_start: None,
            frames: 0,
        }
    }

    /// Counts a frame drawn at `now`. Yields the average rate each time a
    /// window closes.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now - start;
        if elapsed < self.window {
            return None;
        }
        let rate = f64::from(self.frames - 1) / elapsed;
        self.window_start = Some(now);
        self.frames = 1;
        Some(rate)
    }
}

/// True if a release at `release` ends a click that began at `press`.
pub fn is_click(press: Point2<f32>, release: Point2<f32>) -> bool {
    (release - press).norm() < CLICK_TOLERANCE
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            cursor: Point2::origin(),
            press_origin: None,
            frame_rate: FrameRate::new(FPS_WINDOW),
        }
    }

    pub fn process_event(&mut self, event: Event, view: &mut View, now: f64) {
        match event.value {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = Point2::new(x as f32, y as f32);
                if self.press_origin.is_none() {
                    view.hover(self.cursor);
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.press_origin = Some(self.cursor);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                if let Some(origin) = self.press_origin.take() {
                    if is_click(origin, self.cursor) {
                        view.click(self.cursor, now);
                    }
                }
            }
            WindowEvent::FramebufferSize(w, h) => {
                view.resize(w, h);
            }
            _ => {}
        }
    }

    pub fn count_frame(&mut self, now: f64) {
        if let Some(rate) = self.frame_rate.tick(now) {
            debug!("{:.1} fps", rate);
        }
    }
}
