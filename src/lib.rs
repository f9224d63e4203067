mod canvas;
mod error;
mod fonts;
mod layout;
mod model;
mod pdf;
mod report;

pub use canvas::{Canvas, Color, DrawOp, RecordingCanvas, RectMode, StyleToken};
pub use error::Error;
pub use fonts::{FontSource, FontWeight, TextMeasurer, TrueTypeFace, TrueTypeFamily};
pub use layout::{ELLIPSIS, LayoutCursor, PageBreak, truncate_with_ellipsis, wrap_text};
pub use model::{
    AnalysisReport, ComplianceIssue, FlaggedClause, RiskScore, Severity,
    jurisdiction_display_name,
};
pub use pdf::PdfCanvas;
pub use report::{
    Composition, FontSizes, Palette, ReportComposer, ReportOptions, ReportStatus, ScoreBucket,
    ScoreColors, ScoreScale, Section, SectionContext, SectionKind, SeverityColors, Theme,
};

use std::time::Instant;

/// A finished PDF report.
#[derive(Clone, Debug)]
pub struct GeneratedReport {
    pub filename: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

pub fn generate_report(
    report: &AnalysisReport,
    options: &ReportOptions,
    fonts: &FontSource,
) -> Result<GeneratedReport, Error> {
    generate(report, options, fonts, true)
}

/// Same as [`generate_report`], leaving content streams uncompressed so the
/// drawn text is readable in the output bytes.
pub fn generate_report_uncompressed(
    report: &AnalysisReport,
    options: &ReportOptions,
    fonts: &FontSource,
) -> Result<GeneratedReport, Error> {
    generate(report, options, fonts, false)
}

pub fn generate_report_from_json(
    json: &str,
    options: &ReportOptions,
    fonts: &FontSource,
) -> Result<GeneratedReport, Error> {
    let report = AnalysisReport::from_json(json)?;
    generate_report(&report, options, fonts)
}

fn generate(
    report: &AnalysisReport,
    options: &ReportOptions,
    fonts: &FontSource,
    compress: bool,
) -> Result<GeneratedReport, Error> {
    let t0 = Instant::now();

    let mut canvas = PdfCanvas::for_theme(fonts.clone(), &options.theme)
        .with_title(options.report_title.clone())
        .with_creation_date(options.generated_at);
    if !compress {
        canvas = canvas.uncompressed();
    }
    let composition = ReportComposer::new(fonts, options).compose(report, &mut canvas, "pdf")?;
    let t_layout = t0.elapsed();

    let bytes = canvas.finish()?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, assemble={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        composition.page_count,
        bytes.len(),
    );

    Ok(GeneratedReport {
        filename: composition.filename,
        page_count: composition.page_count,
        bytes,
    })
}
