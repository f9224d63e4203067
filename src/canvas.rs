//! The drawing surface the layout engine paints on.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards. Text is positioned by its baseline.

use crate::error::Error;
use crate::fonts::FontWeight;

pub type Color = [u8; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleToken {
    pub color: Color,
    pub font_size: f32,
    pub weight: FontWeight,
}

impl StyleToken {
    pub const fn new(color: Color, font_size: f32, weight: FontWeight) -> Self {
        StyleToken {
            color,
            font_size,
            weight,
        }
    }

    pub const fn with_color(self, color: Color) -> Self {
        StyleToken { color, ..self }
    }

    pub const fn with_weight(self, weight: FontWeight) -> Self {
        StyleToken { weight, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectMode {
    Fill,
    Stroke,
    Both,
}

/// Drawing capability used by the section renderers.
///
/// A canvas starts with a single page which is active. `add_page` appends a
/// page and makes it active.
pub trait Canvas {
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: StyleToken) -> Result<(), Error>;

    fn draw_filled_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color)
    -> Result<(), Error>;

    #[allow(clippy::too_many_arguments)]
    fn draw_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        mode: RectMode,
    ) -> Result<(), Error>;

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color)
    -> Result<(), Error>;

    fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) -> Result<(), Error>;

    fn add_page(&mut self) -> Result<(), Error>;

    fn set_active_page(&mut self, index: usize) -> Result<(), Error>;

    fn page_count(&self) -> usize;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: StyleToken,
    },
    FilledRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    RoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        mode: RectMode,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        color: Color,
    },
}

/// A canvas that keeps every drawing call, grouped by page.
///
/// Used to assert document structure without a rendering backend.
#[derive(Debug)]
pub struct RecordingCanvas {
    pages: Vec<Vec<DrawOp>>,
    active: usize,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        RecordingCanvas {
            pages: vec![Vec::new()],
            active: 0,
        }
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self, page: usize) -> &[DrawOp] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_page(&self) -> usize {
        self.active
    }

    /// Every text draw as `(page, text, style)`, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str, &StyleToken)> + '_ {
        self.pages.iter().enumerate().flat_map(|(page, ops)| {
            ops.iter().filter_map(move |op| match op {
                DrawOp::Text { text, style, .. } => Some((page, text.as_str(), style)),
                _ => None,
            })
        })
    }

    /// Pages (0-based) containing a text draw equal to `needle`.
    pub fn pages_with_text(&self, needle: &str) -> Vec<usize> {
        self.texts()
            .filter(|(_, text, _)| *text == needle)
            .map(|(page, _, _)| page)
            .collect()
    }

    fn push(&mut self, op: DrawOp) -> Result<(), Error> {
        self.pages[self.active].push(op);
        Ok(())
    }
}

impl Canvas for RecordingCanvas {
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: StyleToken) -> Result<(), Error> {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
        })
    }

    fn draw_filled_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    ) -> Result<(), Error> {
        self.push(DrawOp::FilledRect { x, y, w, h, color })
    }

    fn draw_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        mode: RectMode,
    ) -> Result<(), Error> {
        self.push(DrawOp::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            color,
            mode,
        })
    }

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    ) -> Result<(), Error> {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        })
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) -> Result<(), Error> {
        self.push(DrawOp::Circle { cx, cy, r, color })
    }

    fn add_page(&mut self) -> Result<(), Error> {
        self.pages.push(Vec::new());
        self.active = self.pages.len() - 1;
        Ok(())
    }

    fn set_active_page(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.pages.len() {
            return Err(Error::Canvas(format!(
                "page {index} out of range ({} pages)",
                self.pages.len()
            )));
        }
        self.active = index;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }
}
