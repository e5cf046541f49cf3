//! Text cells and a painter that prints what a wheel would show.

use wheel_foundation::{ItemView, TextStyle, TextViewFactory};
use wheel_graphics::{Brush, IntRect, IntSize};
use wheel_ui::{ItemPlacement, WheelPainter};

const CHAR_WIDTH: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.6;

#[derive(Debug, Default)]
pub struct TextCell {
    text: String,
    size: IntSize,
}

impl TextCell {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ItemView for TextCell {
    fn measured_size(&self) -> IntSize {
        self.size
    }
}

/// Sizes cells from a monospace estimate of the bound text.
#[derive(Debug, Default)]
pub struct TextCellFactory;

impl TextViewFactory for TextCellFactory {
    type View = TextCell;

    fn create_item_view(&self) -> TextCell {
        TextCell::default()
    }

    fn create_empty_view(&self) -> TextCell {
        self.create_item_view()
    }

    fn bind_text(&self, view: &mut TextCell, text: &str, style: &TextStyle) {
        view.text.clear();
        view.text.push_str(text);
        // Placeholders keep the row height so the window stays aligned.
        let columns = text.chars().count().max(2) as f32;
        view.size = IntSize::new(
            (columns * style.size * CHAR_WIDTH).ceil() as i32,
            (style.size * LINE_HEIGHT).ceil() as i32,
        );
    }
}

/// Collects the painted rows and renders them as one line of text.
#[derive(Debug, Default)]
pub struct LinePainter {
    rows: Vec<(String, IntRect)>,
    band: Option<IntRect>,
}

impl LinePainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible rows top to bottom, the selected one in brackets.
    pub fn render(&self) -> String {
        let middle = self.band.map(|band| (band.top + band.bottom) / 2);
        self.rows
            .iter()
            .map(|(text, bounds)| {
                let text = if text.is_empty() { "--" } else { text.as_str() };
                match middle {
                    Some(middle) if bounds.top <= middle && middle < bounds.bottom => {
                        format!("[{text}]")
                    }
                    _ => format!(" {text} "),
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

impl WheelPainter<TextCell> for LinePainter {
    fn draw_item(&mut self, view: &TextCell, placement: &ItemPlacement) {
        self.rows.push((view.text().to_owned(), placement.bounds));
    }

    fn draw_center_filter(&mut self, _brush: &Brush, bounds: IntRect) {
        self.band = Some(bounds);
    }

    fn draw_shadow(&mut self, _brush: &Brush, _bounds: IntRect) {}
}
