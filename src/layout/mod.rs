//! Fixed-canvas layout for manufacturing labels and gift notes.
//!
//! Compositors never touch a PDF. They walk a [`Canvas`] that records
//! absolute-positioned draw primitives, and hand back a [`Page`] for a
//! [`crate::render::Renderer`] to turn into bytes. Coordinates are PDF
//! points with the origin at the bottom-left corner, y growing upwards.
//!
//! - [`label`]    : two-column manufacturing label, one per line item
//! - [`gift_note`]: decorative gift note with a word-wrapped message
//! - [`metrics`]  : string widths for anchoring and wrapping

pub mod gift_note;
pub mod label;
pub mod metrics;

use serde::Serialize;

pub use gift_note::{compose_gift_note, wrap_text};
pub use label::{compose_label, LabelGeometry};

/// Convert inches to points.
pub const fn inch(value: f32) -> f32 {
    value * 72.0
}

/// Both artifacts print on a 6 × 4 inch landscape stock.
pub const PAGE_WIDTH: f32 = inch(6.0);
pub const PAGE_HEIGHT: f32 = inch(4.0);

/// Base-14 fonts available to the compositors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Helvetica-BoldOblique")]
    HelveticaBoldOblique,
    #[serde(rename = "ZapfDingbats")]
    ZapfDingbats,
}

/// Which point of the text run `x` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREY: Rgb = Rgb(128, 128, 128);
}

/// One absolute-positioned draw primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// A single-line text run; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        anchor: Anchor,
        color: Rgb,
    },
    /// A stroked line segment.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    /// A stroked, unfilled rectangle; `(x, y)` is the bottom-left corner.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke_width: f32,
        color: Rgb,
    },
}

impl DrawOp {
    /// Left edge of a text run once its anchor is resolved. `None` for
    /// non-text primitives.
    pub fn left_x(&self) -> Option<f32> {
        match self {
            DrawOp::Text {
                x,
                text,
                font,
                size,
                anchor,
                ..
            } => {
                let width = metrics::string_width(text, *font, *size);
                Some(match anchor {
                    Anchor::Left => *x,
                    Anchor::Center => x - width / 2.0,
                    Anchor::Right => x - width,
                })
            }
            _ => None,
        }
    }

    /// Text content, if this is a text run.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// One composed page: its size and the primitives drawn on it, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// First text run equal to `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops.iter().find(|op| op.text() == Some(needle))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }
}

/// Stateful recorder in the style of a PDF content stream: font, colours
/// and line width persist until changed.
#[derive(Debug)]
pub struct Canvas {
    font: Font,
    size: f32,
    fill: Rgb,
    stroke: Rgb,
    line_width: f32,
    page: Page,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            font: Font::Helvetica,
            size: 12.0,
            fill: Rgb::BLACK,
            stroke: Rgb::BLACK,
            line_width: 1.0,
            page: Page {
                width,
                height,
                ops: Vec::new(),
            },
        }
    }

    /// A blank 6 × 4 inch canvas.
    pub fn label_stock() -> Self {
        Self::new(PAGE_WIDTH, PAGE_HEIGHT)
    }

    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.size = size;
    }

    pub fn set_fill(&mut self, color: Rgb) {
        self.fill = color;
    }

    pub fn set_stroke(&mut self, color: Rgb) {
        self.stroke = color;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    /// Width of `text` in the current font.
    pub fn string_width(&self, text: &str) -> f32 {
        metrics::string_width(text, self.font, self.size)
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        self.text(x, y, text, Anchor::Left);
    }

    pub fn draw_centred(&mut self, x: f32, y: f32, text: &str) {
        self.text(x, y, text, Anchor::Center);
    }

    pub fn draw_right(&mut self, x: f32, y: f32, text: &str) {
        self.text(x, y, text, Anchor::Right);
    }

    fn text(&mut self, x: f32, y: f32, text: &str, anchor: Anchor) {
        self.page.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font: self.font,
            size: self.size,
            anchor,
            color: self.fill,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.page.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width: self.line_width,
            color: self.stroke,
        });
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.page.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            stroke_width: self.line_width,
            color: self.stroke,
        });
    }

    pub fn finish(self) -> Page {
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_six_by_four_landscape() {
        assert_eq!(PAGE_WIDTH, 432.0);
        assert_eq!(PAGE_HEIGHT, 288.0);
    }

    #[test]
    fn canvas_state_persists_across_ops() {
        let mut c = Canvas::label_stock();
        c.set_font(Font::HelveticaBold, 9.0);
        c.set_fill(Rgb::GREY);
        c.draw_string(10.0, 20.0, "a");
        c.draw_right(100.0, 20.0, "b");
        c.set_line_width(2.0);
        c.rect(0.0, 0.0, 5.0, 5.0);
        let page = c.finish();

        assert_eq!(page.ops.len(), 3);
        match &page.ops[1] {
            DrawOp::Text {
                font,
                size,
                color,
                anchor,
                ..
            } => {
                assert_eq!(*font, Font::HelveticaBold);
                assert_eq!(*size, 9.0);
                assert_eq!(*color, Rgb::GREY);
                assert_eq!(*anchor, Anchor::Right);
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert!(matches!(page.ops[2], DrawOp::Rect { stroke_width, .. } if stroke_width == 2.0));
    }

    #[test]
    fn left_x_resolves_anchor() {
        let mut c = Canvas::label_stock();
        c.set_font(Font::Helvetica, 10.0);
        let w = c.string_width("Hello");
        c.draw_centred(100.0, 0.0, "Hello");
        c.draw_right(100.0, 0.0, "Hello");
        c.line(0.0, 0.0, 1.0, 1.0);
        let page = c.finish();
        assert!((page.ops[0].left_x().unwrap() - (100.0 - w / 2.0)).abs() < 1e-4);
        assert!((page.ops[1].left_x().unwrap() - (100.0 - w)).abs() < 1e-4);
        assert_eq!(page.ops[2].left_x(), None);
    }

    #[test]
    fn draw_ops_serialise_tagged() {
        let op = DrawOp::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
            width: 0.5,
            color: Rgb::BLACK,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "line");
        assert_eq!(json["width"], 0.5);
    }
}
