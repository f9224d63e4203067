use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ttf_parser::Face;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
    Italic,
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Italic => "italic",
        })
    }
}

/// Width of rendered text in layout units (points).
///
/// Implementations must be pure: the same text, size and weight always
/// measure the same. `normalize` defines what the backend can draw; the
/// layout engine only measures and draws normalized strings, so measured and
/// drawn widths agree.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> Result<f32, Error>;

    /// Strip characters the font cannot represent and collapse whitespace runs.
    fn normalize(&self, text: &str) -> String {
        collapse_whitespace(text, |c| char_to_winansi(c) != 0)
    }
}

/// Collapse whitespace runs into single spaces, trim both ends, and drop
/// characters for which `supported` is false.
pub(crate) fn collapse_whitespace(text: &str, supported: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() || !supported(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Fonts available to the layout engine and the PDF backend.
///
/// Cheap to clone; TrueType data sits behind an `Arc` so one loaded family
/// can serve concurrent report generations.
#[derive(Clone, Default)]
pub enum FontSource {
    /// Base-14 Helvetica family, WinAnsi encoded. Needs no font files.
    #[default]
    Standard,
    TrueType(Arc<TrueTypeFamily>),
}

impl FontSource {
    pub fn truetype(family: TrueTypeFamily) -> Self {
        FontSource::TrueType(Arc::new(family))
    }

    /// PDF base font name of a standard face.
    pub(crate) fn standard_base_font(weight: FontWeight) -> &'static [u8] {
        match weight {
            FontWeight::Normal => b"Helvetica",
            FontWeight::Bold => b"Helvetica-Bold",
            FontWeight::Italic => b"Helvetica-Oblique",
        }
    }
}

impl TextMeasurer for FontSource {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> Result<f32, Error> {
        match self {
            FontSource::Standard => {
                // Helvetica-Oblique shares the upright advance widths.
                let bold = weight == FontWeight::Bold;
                Ok(text
                    .chars()
                    .map(|ch| helvetica_width_1000(ch, bold) * font_size / 1000.0)
                    .sum())
            }
            FontSource::TrueType(family) => {
                let face = family.face(weight)?;
                Ok(face.text_width(text, font_size))
            }
        }
    }

    fn normalize(&self, text: &str) -> String {
        match self {
            FontSource::Standard => collapse_whitespace(text, |c| char_to_winansi(c) != 0),
            FontSource::TrueType(family) => {
                collapse_whitespace(text, |c| family.regular.glyphs.contains_key(&c))
            }
        }
    }
}

/// Helvetica AFM advance widths (1000 units/em) for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold AFM advance widths (1000 units/em) for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn helvetica_width_1000(ch: char, bold: bool) -> f32 {
    let ascii = if bold {
        &HELVETICA_BOLD_ASCII
    } else {
        &HELVETICA_ASCII
    };
    let w = match ch {
        ' '..='~' => ascii[ch as usize - 32],
        '\u{2022}' => 350,
        '\u{2026}' | '\u{2014}' | '\u{2030}' => 1000,
        '\u{2013}' | '\u{20AC}' => 556,
        '\u{2018}' | '\u{2019}' | '\u{201A}' => {
            if bold {
                278
            } else {
                222
            }
        }
        '\u{201C}' | '\u{201D}' | '\u{201E}' => {
            if bold {
                500
            } else {
                333
            }
        }
        '\u{00C6}' | '\u{0152}' => 1000,
        '\u{00C0}'..='\u{00DE}' => 722,
        '\u{00DF}'..='\u{00FF}' => {
            if bold {
                611
            } else {
                556
            }
        }
        '\u{00A0}' => 278,
        c if char_to_winansi(c) != 0 => 556,
        _ => 0,
    };
    w as f32
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
pub(crate) fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Metrics and raw data of one TrueType/OpenType face.
#[derive(Debug)]
pub struct TrueTypeFace {
    pub(crate) name: String,
    pub(crate) data: Vec<u8>,
    pub(crate) face_index: u32,
    /// char -> (glyph id, advance width in 1000 units/em)
    pub(crate) glyphs: HashMap<char, (u16, f32)>,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    pub(crate) cap_height: f32,
    pub(crate) bbox: [f32; 4],
}

impl TrueTypeFace {
    pub fn from_bytes(data: Vec<u8>, face_index: u32) -> Result<Self, Error> {
        let face = Face::parse(&data, face_index)
            .map_err(|e| Error::Measurement(format!("cannot parse font data: {e}")))?;

        let units = face.units_per_em() as f32;
        let scale = |v: f32| v / units * 1000.0;
        let name = family_name(&face).unwrap_or_else(|| "EmbeddedFont".to_string());

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    let Some(ch) = char::from_u32(cp) else {
                        return;
                    };
                    if let Some(gid) = subtable.glyph_index(cp) {
                        let adv = face.glyph_hor_advance(gid).unwrap_or(0) as f32;
                        glyphs.entry(ch).or_insert((gid.0, scale(adv)));
                    }
                });
            }
        }
        if glyphs.is_empty() {
            return Err(Error::Measurement(format!(
                "font {name} has no unicode character map"
            )));
        }

        let bb = face.global_bounding_box();
        let ascent = scale(face.ascender() as f32);
        let descent = scale(face.descender() as f32);
        let cap_height = face
            .capital_height()
            .map(|h| scale(h as f32))
            .unwrap_or(700.0);
        let bbox = [
            scale(bb.x_min as f32),
            scale(bb.y_min as f32),
            scale(bb.x_max as f32),
            scale(bb.y_max as f32),
        ];

        log::debug!("Loaded font {name}: {} mapped characters", glyphs.len());

        Ok(TrueTypeFace {
            name,
            data,
            face_index,
            glyphs,
            ascent,
            descent,
            cap_height,
            bbox,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())))
        })?;
        Self::from_bytes(data, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.glyphs.get(&ch).map_or(0.0, |&(_, w)| w) * font_size / 1000.0)
            .sum()
    }
}

fn family_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|n| n.name_id == ttf_parser::name_id::FAMILY && n.is_unicode())
        .and_then(|n| n.to_string())
}

/// A TrueType family: the regular face is required, bold and italic are used
/// when present. Requesting a weight that was not loaded is a measurement
/// failure rather than a silent substitution.
pub struct TrueTypeFamily {
    pub(crate) regular: TrueTypeFace,
    pub(crate) bold: Option<TrueTypeFace>,
    pub(crate) italic: Option<TrueTypeFace>,
}

impl TrueTypeFamily {
    pub fn new(regular: TrueTypeFace) -> Self {
        TrueTypeFamily {
            regular,
            bold: None,
            italic: None,
        }
    }

    pub fn with_bold(mut self, face: TrueTypeFace) -> Self {
        self.bold = Some(face);
        self
    }

    pub fn with_italic(mut self, face: TrueTypeFace) -> Self {
        self.italic = Some(face);
        self
    }

    pub(crate) fn face(&self, weight: FontWeight) -> Result<&TrueTypeFace, Error> {
        let face = match weight {
            FontWeight::Normal => Some(&self.regular),
            FontWeight::Bold => self.bold.as_ref(),
            FontWeight::Italic => self.italic.as_ref(),
        };
        face.ok_or_else(|| {
            Error::Measurement(format!(
                "no {weight} face loaded for font family {}",
                self.regular.name
            ))
        })
    }
}
