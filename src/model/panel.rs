//! Layout of the info panel, in window pixels with the origin at the top
//! left. Sizes are given in logical pixels and multiplied by the window's
//! scale factor.

use nalgebra::{Point2, Point3};

use super::info::InfoRecord;

pub const PANEL_WIDTH: f32 = 300.0;
pub const PANEL_MARGIN: f32 = 20.0;
pub const PANEL_PADDING: f32 = 15.0;

pub const TITLE_SIZE: f32 = 18.0;
pub const TEXT_SIZE: f32 = 14.0;
const LINE_SPACING: f32 = 1.4;
// Average glyph advance relative to font size, for wrapping
const CHAR_WIDTH_RATIO: f32 = 0.5;

const SECTION_GAP: f32 = 10.0;
const BUTTON_WIDTH: f32 = 70.0;
const BUTTON_HEIGHT: f32 = 26.0;

pub const CLOSE_LABEL: &str = "Cerrar";

pub const TITLE_COLOR: [f32; 3] = [1.0, 0.8, 0.0];
pub const TEXT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const BACKGROUND_COLOR: [f32; 3] = [0.05, 0.05, 0.08];
pub const BUTTON_COLOR: [f32; 3] = [1.0, 0.27, 0.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Top-left corner of the line
    pub position: Point2<f32>,
    pub size: f32,
    pub color: Point3<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub rect: Rect,
    pub lines: Vec<TextLine>,
    pub close_button: Rect,
}

impl PanelLayout {
    /// Lays out the panel for `record`, anchored to the bottom-left corner
    /// of a `viewport` (in pixels).
    pub fn new(record: &InfoRecord, viewport: (u32, u32), scale: f32) -> Self {
        let width = PANEL_WIDTH * scale;
        let padding = PANEL_PADDING * scale;
        let inner_width = width - 2.0 * padding;

        // Stack lines from a zero origin first, move into place once the
        // height is known
        let mut lines = Vec::new();
        let mut y = padding;
        let mut push = |text: String, size: f32, color: [f32; 3], y: &mut f32| {
            lines.push(TextLine {
                text,
                position: Point2::new(padding, *y),
                size,
                color: Point3::from(color),
            });
            *y += size * LINE_SPACING;
        };

        push(String::from(record.name), TITLE_SIZE * scale, TITLE_COLOR, &mut y);
        y += SECTION_GAP * scale;

        let max_chars = chars_per_line(inner_width, TEXT_SIZE * scale);
        for text in wrap_text(record.description, max_chars) {
            push(text, TEXT_SIZE * scale, TEXT_COLOR, &mut y);
        }
        y += SECTION_GAP * scale;

        for (label, value) in record.facts() {
            for text in wrap_text(&format!("{}: {}", label, value), max_chars) {
                push(text, TEXT_SIZE * scale, TEXT_COLOR, &mut y);
            }
        }
        y += SECTION_GAP * scale;

        let mut close_button = Rect {
            x: width - padding - BUTTON_WIDTH * scale,
            y,
            width: BUTTON_WIDTH * scale,
            height: BUTTON_HEIGHT * scale,
        };
        let height = y + close_button.height + padding;

        let (_, viewport_height) = viewport;
        let rect = Rect {
            x: PANEL_MARGIN * scale,
            y: viewport_height as f32 - PANEL_MARGIN * scale - height,
            width,
            height,
        };

        for line in lines.iter_mut() {
            line.position.x += rect.x;
            line.position.y += rect.y;
        }
        close_button.x += rect.x;
        close_button.y += rect.y;

        PanelLayout {
            rect,
            lines,
            close_button,
        }
    }

    /// Whether a pointer position falls on the panel. Clicks there are for
    /// the panel only.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    pub fn close_hit(&self, x: f32, y: f32) -> bool {
        self.close_button.contains(x, y)
    }

    /// Label for the close button, centred in it.
    pub fn close_label(&self, scale: f32) -> TextLine {
        let size = TEXT_SIZE * scale;
        let approx_width = CLOSE_LABEL.chars().count() as f32 * size * CHAR_WIDTH_RATIO;
        let center = self.close_button.center();
        TextLine {
            text: String::from(CLOSE_LABEL),
            position: Point2::new(center.x - approx_width / 2.0, center.y - size / 2.0),
            size,
            color: Point3::from(TEXT_COLOR),
        }
    }
}

fn chars_per_line(width: f32, font_size: f32) -> usize {
    ((width / (font_size * CHAR_WIDTH_RATIO)) as usize).max(1)
}

/// Greedy word wrap. Words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{self, MOON, SATURN};

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
        assert_eq!(wrap_text("uno dos tres", 7), vec!["uno dos", "tres"]);
        assert_eq!(wrap_text("uno dos tres", 100), vec!["uno dos tres"]);
        assert_eq!(wrap_text("abcdefghij k", 4), vec!["abcd", "efgh", "ij k"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let lines = wrap_text("Júpiter rotación", 8);
        assert_eq!(lines, vec!["Júpiter", "rotación"]);
    }

    #[test]
    fn test_panel_sits_bottom_left() {
        let layout = PanelLayout::new(&catalog::spec(SATURN).info, (1280, 720), 1.0);
        assert_eq!(layout.rect.x, 20.0);
        assert_eq!(layout.rect.width, 300.0);
        assert!((layout.rect.y + layout.rect.height - 700.0).abs() < 1e-3);

        assert_eq!(layout.lines[0].text, "Saturno");
        assert_eq!(layout.lines[0].color, Point3::from(TITLE_COLOR));
        for line in &layout.lines {
            assert!(layout.contains(line.position.x, line.position.y));
        }
        let button = layout.close_button.center();
        assert!(layout.contains(button.x, button.y));
        assert!(layout.close_hit(button.x, button.y));
        assert!(!layout.contains(640.0, 360.0));
    }

    #[test]
    fn test_moon_panel_mentions_earth_distance() {
        let layout = PanelLayout::new(&catalog::spec(MOON).info, (800, 600), 1.0);
        assert!(layout
            .lines
            .iter()
            .any(|l| l.text.starts_with("Distancia a la Tierra")));

        let saturn = PanelLayout::new(&catalog::spec(SATURN).info, (800, 600), 1.0);
        assert!(!saturn
            .lines
            .iter()
            .any(|l| l.text.starts_with("Distancia a la Tierra")));
    }

    #[test]
    fn test_relayout_follows_viewport() {
        let record = &catalog::spec(SATURN).info;
        let small = PanelLayout::new(record, (800, 600), 1.0);
        let tall = PanelLayout::new(record, (800, 900), 1.0);
        assert!((tall.rect.y - small.rect.y - 300.0).abs() < 1e-3);
        assert_eq!(tall.rect.height, small.rect.height);

        let hidpi = PanelLayout::new(record, (1600, 1200), 2.0);
        assert_eq!(hidpi.rect.width, 600.0);
        assert_eq!(hidpi.rect.x, 40.0);
    }
}
