use std::rc::Rc;

use kiss3d::scene::PlanarSceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Translation2};

use crate::model::panel::{PanelLayout, Rect, TextLine, BACKGROUND_COLOR, BUTTON_COLOR};

// kiss3d's text coordinates (positions and font sizes) run at twice the
// framebuffer's
const TEXT_SPACE_SCALE: f32 = 2.0;

/// Draws the info panel: two planar rectangles for the background and the
/// close button, and text on top.
pub struct PanelOverlay {
    background: PlanarSceneNode,
    button: PlanarSceneNode,
}

impl PanelOverlay {
    pub fn new(window: &mut Window) -> Self {
        let mut background = window.add_rectangle(1.0, 1.0);
        let [r, g, b] = BACKGROUND_COLOR;
        background.set_color(r, g, b);
        background.set_visible(false);

        let mut button = window.add_rectangle(1.0, 1.0);
        let [r, g, b] = BUTTON_COLOR;
        button.set_color(r, g, b);
        button.set_visible(false);

        PanelOverlay { background, button }
    }

    pub fn draw(
        &mut self,
        window: &mut Window,
        layout: Option<&PanelLayout>,
        viewport: (u32, u32),
        scale: f32,
    ) {
        let layout = match layout {
            Some(layout) => layout,
            None => {
                self.background.set_visible(false);
                self.button.set_visible(false);
                return;
            }
        };

        place_rect(&mut self.background, &layout.rect, viewport, scale);
        place_rect(&mut self.button, &layout.close_button, viewport, scale);

        let font = Font::default();
        for line in layout.lines.iter() {
            draw_line(window, line, &font);
        }
        draw_line(window, &layout.close_label(scale), &font);
    }
}

fn draw_line(window: &mut Window, line: &TextLine, font: &Rc<Font>) {
    window.draw_text(
        &line.text,
        &Point2::from(line.position.coords * TEXT_SPACE_SCALE),
        line.size * TEXT_SPACE_SCALE,
        font,
        &line.color,
    );
}

/// Moves a unit rectangle over `rect`. Planar coordinates have their origin
/// in the middle of the window, y up, in unscaled pixels.
fn place_rect(node: &mut PlanarSceneNode, rect: &Rect, viewport: (u32, u32), scale: f32) {
    let (width, height) = (viewport.0 as f32, viewport.1 as f32);
    let center = rect.center();
    node.set_local_translation(Translation2::new(
        (center.x - width / 2.0) / scale,
        (height / 2.0 - center.y) / scale,
    ));
    node.set_local_scale(rect.width / scale, rect.height / scale);
    node.set_visible(true);
}
