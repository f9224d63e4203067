//! [`Canvas`] backed by pdf-writer.

mod embed;

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::canvas::{Canvas, Color, RectMode, StyleToken};
use crate::error::Error;
use crate::fonts::{FontSource, FontWeight, to_winansi_bytes};
use crate::report::Theme;

use embed::{FontSubset, embed_subset};

const WEIGHTS: [FontWeight; 3] = [FontWeight::Normal, FontWeight::Bold, FontWeight::Italic];

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

fn slot(weight: FontWeight) -> usize {
    match weight {
        FontWeight::Normal => 0,
        FontWeight::Bold => 1,
        FontWeight::Italic => 2,
    }
}

fn resource_name(weight: FontWeight) -> &'static [u8] {
    match weight {
        FontWeight::Normal => b"F1",
        FontWeight::Bold => b"F2",
        FontWeight::Italic => b"F3",
    }
}

fn rgb(color: Color) -> (f32, f32, f32) {
    (
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

/// Collects drawing calls into per-page content streams and assembles the
/// PDF in [`finish`](PdfCanvas::finish).
///
/// Takes top-down canvas coordinates and flips them into PDF user space.
pub struct PdfCanvas {
    fonts: FontSource,
    page_width: f32,
    page_height: f32,
    pages: Vec<Content>,
    active: usize,
    used: [bool; 3],
    subsets: [Option<FontSubset>; 3],
    compress: bool,
    title: Option<String>,
    created: Option<DateTime<Utc>>,
}

impl PdfCanvas {
    pub fn new(fonts: FontSource, page_width: f32, page_height: f32) -> Self {
        PdfCanvas {
            fonts,
            page_width,
            page_height,
            pages: vec![Content::new()],
            active: 0,
            used: [false; 3],
            subsets: [None, None, None],
            compress: true,
            title: None,
            created: None,
        }
    }

    pub fn for_theme(fonts: FontSource, theme: &Theme) -> Self {
        Self::new(fonts, theme.page_width, theme.page_height)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_creation_date(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Write content streams without Flate compression.
    pub fn uncompressed(mut self) -> Self {
        self.compress = false;
        self
    }

    fn page_y(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn content(&mut self) -> &mut Content {
        &mut self.pages[self.active]
    }

    /// Encode `text` for the font used at `weight`: WinAnsi bytes for the
    /// standard fonts, big-endian subset glyph ids for embedded ones.
    fn encode(&mut self, text: &str, weight: FontWeight) -> Result<Vec<u8>, Error> {
        let idx = slot(weight);
        self.used[idx] = true;
        match &self.fonts {
            FontSource::Standard => Ok(to_winansi_bytes(text)),
            FontSource::TrueType(family) => {
                let face = family.face(weight)?;
                let subset = self.subsets[idx].get_or_insert_with(FontSubset::new);
                let mut out = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let gid = match face.glyphs.get(&ch) {
                        Some(&(gid, width)) => subset.remap(ch, gid, width),
                        None => {
                            log::warn!("No glyph for {ch:?} in {}", face.name);
                            0
                        }
                    };
                    out.extend_from_slice(&gid.to_be_bytes());
                }
                Ok(out)
            }
        }
    }

    fn rounded_rect_path(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let k = r * KAPPA;
        let bottom = self.page_y(y + h);
        let top = bottom + h;
        let right = x + w;
        let c = self.content();
        c.move_to(x + r, bottom);
        c.line_to(right - r, bottom);
        c.cubic_to(right - r + k, bottom, right, bottom + r - k, right, bottom + r);
        c.line_to(right, top - r);
        c.cubic_to(right, top - r + k, right - r + k, top, right - r, top);
        c.line_to(x + r, top);
        c.cubic_to(x + r - k, top, x, top - r + k, x, top - r);
        c.line_to(x, bottom + r);
        c.cubic_to(x, bottom + r - k, x + r - k, bottom, x + r, bottom);
        c.close_path();
    }

    /// Assemble the document and return the PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();

        // Fonts: only the weights that were drawn with.
        let mut font_pairs: Vec<(&'static [u8], Ref)> = Vec::new();
        for weight in WEIGHTS {
            let idx = slot(weight);
            if !self.used[idx] {
                continue;
            }
            let font_ref = alloc();
            match &self.fonts {
                FontSource::Standard => {
                    pdf.type1_font(font_ref)
                        .base_font(Name(FontSource::standard_base_font(weight)))
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                }
                FontSource::TrueType(family) => {
                    let face = family.face(weight)?;
                    let empty = FontSubset::new();
                    let subset = self.subsets[idx].as_ref().unwrap_or(&empty);
                    embed_subset(&mut pdf, font_ref, face, weight, subset, self.compress, &mut alloc)?;
                }
            }
            font_pairs.push((resource_name(weight), font_ref));
        }

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, c) in self.pages.into_iter().enumerate() {
            let raw = c.finish();
            if self.compress {
                let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
                pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
            } else {
                pdf.stream(content_ids[i], raw.as_slice());
            }
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name), *font_ref);
            }
        }

        {
            let mut info = pdf.document_info(info_id);
            info.producer(TextStr(concat!("compliance-report ", env!("CARGO_PKG_VERSION"))));
            if let Some(title) = &self.title {
                info.title(TextStr(title));
            }
            if let Some(created) = self.created {
                info.creation_date(
                    Date::new(created.year().clamp(0, 9999) as u16)
                        .month(created.month() as u8)
                        .day(created.day() as u8)
                        .hour(created.hour() as u8)
                        .minute(created.minute() as u8)
                        .second(created.second() as u8)
                        .utc_offset_hour(0),
                );
            }
        }

        let bytes = pdf.finish();
        log::info!(
            "PDF assembly: {n} page(s), {} bytes, {:.1}ms",
            bytes.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(bytes)
    }
}

impl Canvas for PdfCanvas {
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: StyleToken) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }
        let bytes = self.encode(text, style.weight)?;
        let py = self.page_y(y);
        let (r, g, b) = rgb(style.color);
        let c = self.content();
        c.begin_text();
        c.set_fill_rgb(r, g, b);
        c.set_font(Name(resource_name(style.weight)), style.font_size);
        c.next_line(x, py);
        c.show(Str(&bytes));
        c.end_text();
        Ok(())
    }

    fn draw_filled_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    ) -> Result<(), Error> {
        let bottom = self.page_y(y + h);
        let (r, g, b) = rgb(color);
        let c = self.content();
        c.save_state();
        c.set_fill_rgb(r, g, b);
        c.rect(x, bottom, w, h);
        c.fill_nonzero();
        c.restore_state();
        Ok(())
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
        let (r, g, b) = rgb(color);
        self.content().save_state();
        {
            let c = self.content();
            match mode {
                RectMode::Fill => {
                    c.set_fill_rgb(r, g, b);
                }
                RectMode::Stroke => {
                    c.set_stroke_rgb(r, g, b);
                    c.set_line_width(0.75);
                }
                RectMode::Both => {
                    c.set_fill_rgb(r, g, b);
                    c.set_stroke_rgb(r, g, b);
                    c.set_line_width(0.75);
                }
            }
        }
        self.rounded_rect_path(x, y, w, h, radius);
        let c = self.content();
        match mode {
            RectMode::Fill => c.fill_nonzero(),
            RectMode::Stroke => c.stroke(),
            RectMode::Both => c.fill_nonzero_and_stroke(),
        };
        c.restore_state();
        Ok(())
    }

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    ) -> Result<(), Error> {
        let (py1, py2) = (self.page_y(y1), self.page_y(y2));
        let (r, g, b) = rgb(color);
        let c = self.content();
        c.save_state();
        c.set_stroke_rgb(r, g, b);
        c.set_line_width(0.5);
        c.move_to(x1, py1);
        c.line_to(x2, py2);
        c.stroke();
        c.restore_state();
        Ok(())
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) -> Result<(), Error> {
        let cy = self.page_y(cy);
        let k = radius * KAPPA;
        let (r, g, b) = rgb(color);
        let c = self.content();
        c.save_state();
        c.set_fill_rgb(r, g, b);
        c.move_to(cx + radius, cy);
        c.cubic_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius);
        c.cubic_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy);
        c.cubic_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius);
        c.cubic_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy);
        c.close_path();
        c.fill_nonzero();
        c.restore_state();
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), Error> {
        self.pages.push(Content::new());
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
