mod common;

use compliance_report::{
    Error, FontSource, FontWeight, TextMeasurer, Theme, TrueTypeFace, TrueTypeFamily,
    generate_report, generate_report_uncompressed,
};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn regular_only() -> Option<FontSource> {
    let regular = common::fixture_face("DejaVuSans.ttf")?;
    Some(FontSource::truetype(TrueTypeFamily::new(regular)))
}

fn full_family() -> Option<FontSource> {
    let family = TrueTypeFamily::new(common::fixture_face("DejaVuSans.ttf")?)
        .with_bold(common::fixture_face("DejaVuSans-Bold.ttf")?)
        .with_italic(common::fixture_face("DejaVuSans-Oblique.ttf")?);
    Some(FontSource::truetype(family))
}

#[test]
fn normalize_drops_characters_outside_the_cmap() {
    let _ = env_logger::try_init();
    let Some(fonts) = regular_only() else {
        println!("DejaVuSans.ttf not found, skipping.");
        return;
    };
    assert_eq!(fonts.normalize("Résumé  中文 \u{2713}"), "Résumé \u{2713}");
    // Helvetica has no check mark.
    assert_eq!(FontSource::Standard.normalize("Résumé \u{2713}"), "Résumé");
}

#[test]
fn measurement_uses_face_advances() {
    let Some(fonts) = regular_only() else {
        println!("DejaVuSans.ttf not found, skipping.");
        return;
    };
    let narrow = fonts.measure("iii", 10.0, FontWeight::Normal).unwrap();
    let wide = fonts.measure("WWW", 10.0, FontWeight::Normal).unwrap();
    assert!(narrow > 0.0);
    assert!(wide > narrow);
    assert_eq!(fonts.measure("WWW", 20.0, FontWeight::Normal).unwrap(), wide * 2.0);
}

#[test]
fn unloaded_weight_is_a_measurement_error() {
    let Some(fonts) = regular_only() else {
        println!("DejaVuSans.ttf not found, skipping.");
        return;
    };
    let err = fonts.measure("Clause", 10.0, FontWeight::Bold).unwrap_err();
    assert!(matches!(err, Error::Measurement(_)));

    // The header title is bold, so the whole report fails the same way.
    let err = generate_report(
        &common::report("MY"),
        &common::options(Theme::default()),
        &fonts,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Measurement(_)));
}

#[test]
fn garbage_font_data_is_rejected() {
    let err = TrueTypeFace::from_bytes(b"not a font".to_vec(), 0).unwrap_err();
    assert!(matches!(err, Error::Measurement(_)));
}

#[test]
fn embedded_fonts_are_subsetted_cid_fonts() {
    let _ = env_logger::try_init();
    let Some(fonts) = full_family() else {
        println!("DejaVu fixtures not found, skipping.");
        return;
    };
    let mut report = common::report_with_clauses(12, 300);
    report.summary = "Résumé of obligations \u{2713} under the agreement.".to_string();
    let out = generate_report_uncompressed(&report, &common::options(Theme::default()), &fonts)
        .unwrap();

    assert!(out.bytes.starts_with(b"%PDF-"));
    assert!(out.page_count >= 1);
    for marker in [
        &b"/Type0"[..],
        b"/CIDFontType2",
        b"/Identity-H",
        b"/ToUnicode",
        b"/FontFile2",
        b"/DejaVuSans-bold",
        b"/DejaVuSans-italic",
    ] {
        assert!(
            contains(&out.bytes, marker),
            "missing {}",
            String::from_utf8_lossy(marker)
        );
    }
    assert!(!contains(&out.bytes, b"/Helvetica"));

    // Subsetting keeps the file far below the three full faces.
    let compressed =
        generate_report(&report, &common::options(Theme::default()), &fonts).unwrap();
    assert!(compressed.bytes.len() < 600_000, "{} bytes", compressed.bytes.len());
}
