use std::collections::BTreeMap;

use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Filter, Name, Pdf, Rect, Ref, Str};
use subsetter::GlyphRemapper;

use crate::error::Error;
use crate::fonts::{FontWeight, TrueTypeFace};

/// Glyphs of one embedded face that the document actually shows.
pub(super) struct FontSubset {
    remapper: GlyphRemapper,
    /// subset glyph id -> (character, advance in 1000 units/em)
    glyphs: BTreeMap<u16, (char, f32)>,
}

impl FontSubset {
    pub(super) fn new() -> Self {
        let mut remapper = GlyphRemapper::new();
        remapper.remap(0);
        FontSubset {
            remapper,
            glyphs: BTreeMap::new(),
        }
    }

    pub(super) fn remap(&mut self, ch: char, gid: u16, width: f32) -> u16 {
        let new_gid = self.remapper.remap(gid);
        self.glyphs.entry(new_gid).or_insert((ch, width));
        new_gid
    }
}

fn identity() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

/// Write `face` as a Type0 font with an Identity-H CIDFontType2 descendant,
/// subsetted to the glyphs in `subset`.
pub(super) fn embed_subset(
    pdf: &mut Pdf,
    font_ref: Ref,
    face: &TrueTypeFace,
    weight: FontWeight,
    subset: &FontSubset,
    compress: bool,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<(), Error> {
    let descriptor_ref = alloc();
    let data_ref = alloc();
    let cid_font_ref = alloc();
    let tounicode_ref = alloc();

    let data = subsetter::subset(&face.data, face.face_index, &subset.remapper)
        .map_err(|e| Error::Canvas(format!("font subsetting failed for {}: {e}", face.name)))?;
    let data_len = i32::try_from(data.len())
        .map_err(|_| Error::Canvas(format!("font {} is too large to embed", face.name)))?;
    if compress {
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&data, 6);
        pdf.stream(data_ref, &compressed)
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), data_len);
    } else {
        pdf.stream(data_ref, &data).pair(Name(b"Length1"), data_len);
    }

    let ps_name = format!("{}-{weight}", face.name.replace(' ', ""));
    let (flags, italic_angle) = match weight {
        FontWeight::Italic => (FontFlags::NON_SYMBOLIC | FontFlags::ITALIC, -12.0),
        _ => (FontFlags::NON_SYMBOLIC, 0.0),
    };
    let [x0, y0, x1, y1] = face.bbox;
    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(flags)
        .bbox(Rect::new(x0, y0, x1, y1))
        .italic_angle(italic_angle)
        .ascent(face.ascent)
        .descent(face.descent)
        .cap_height(face.cap_height)
        .stem_v(if weight == FontWeight::Bold { 120.0 } else { 80.0 })
        .font_file2(data_ref);

    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(identity());
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        if !subset.glyphs.is_empty() {
            let mut w = cid.widths();
            for (&gid, &(_, width)) in &subset.glyphs {
                w.consecutive(gid, [width]);
            }
        }
    }

    let cmap_name = format!("{ps_name}-UTF16");
    let mut cmap = UnicodeCmap::new(Name(cmap_name.as_bytes()), identity());
    for (&gid, &(ch, _)) in &subset.glyphs {
        cmap.pair(gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    log::debug!(
        "Embedded {ps_name}: {} glyphs, {} bytes",
        subset.glyphs.len(),
        data.len()
    );
    Ok(())
}
