mod sections;
mod theme;

use chrono::{DateTime, Utc};

use crate::canvas::Canvas;
use crate::error::Error;
use crate::fonts::TextMeasurer;
use crate::layout::LayoutCursor;
use crate::model::AnalysisReport;

pub use sections::{ReportStatus, Section, SectionContext, SectionKind};
pub use theme::{
    FontSizes, Palette, ScoreBucket, ScoreColors, ScoreScale, SeverityColors, Theme,
};

/// Caller-controlled settings of one report generation.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub theme: Theme,
    pub product_name: String,
    pub report_title: String,
    /// Timestamp printed in the header and used in the derived filename.
    pub generated_at: DateTime<Utc>,
    /// Overrides the derived filename when set.
    pub filename: Option<String>,
    pub currency_symbol: String,
    pub confidentiality_notice: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            theme: Theme::default(),
            product_name: "Compliance Analyzer".to_string(),
            report_title: "Contract Compliance Analysis Report".to_string(),
            generated_at: Utc::now(),
            filename: None,
            currency_symbol: "$".to_string(),
            confidentiality_notice:
                "Confidential - generated by automated compliance analysis. Not legal advice."
                    .to_string(),
        }
    }
}

impl ReportOptions {
    /// `{product}-{jurisdiction letters}-{date-time}.{ext}`, or the explicit
    /// filename when one was given.
    pub fn filename_for(&self, report: &AnalysisReport, ext: &str) -> String {
        if let Some(name) = &self.filename {
            return name.clone();
        }
        let mut parts = vec![slug(&self.product_name)];
        let letters: String = report
            .jurisdiction_code
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect();
        if !letters.is_empty() {
            parts.push(letters);
        }
        // ISO 8601 with `-` for `:` so the name is valid on every filesystem.
        parts.push(self.generated_at.format("%Y-%m-%dT%H-%M-%S").to_string());
        format!("{}.{ext}", parts.join("-"))
    }
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Outcome of laying out one report.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    /// Sections in the order they were rendered, footer last.
    pub sections: Vec<SectionKind>,
    pub page_count: usize,
    pub filename: String,
}

/// Lays out an [`AnalysisReport`] on a [`Canvas`] in a fixed section order:
/// header, executive summary, risk score card (when present), flagged clauses,
/// compliance issues, then a footer pass over every page.
pub struct ReportComposer<'a> {
    measurer: &'a dyn TextMeasurer,
    options: &'a ReportOptions,
}

impl<'a> ReportComposer<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, options: &'a ReportOptions) -> Self {
        ReportComposer { measurer, options }
    }

    /// Draw `report` onto `canvas`, which must be fresh (a single empty page).
    /// `ext` is the extension of the derived filename.
    pub fn compose(
        &self,
        report: &AnalysisReport,
        canvas: &mut dyn Canvas,
        ext: &str,
    ) -> Result<Composition, Error> {
        let theme = &self.options.theme;
        theme.validate()?;
        report.validate()?;
        if canvas.page_count() != 1 {
            return Err(Error::Canvas(format!(
                "expected a fresh canvas with one page, found {} pages",
                canvas.page_count()
            )));
        }
        canvas.set_active_page(0)?;

        let ctx = SectionContext {
            theme,
            measurer: self.measurer,
            options: self.options,
        };
        let mut cursor = LayoutCursor::new(
            theme.page_width,
            theme.page_height,
            theme.margin,
            theme.line_height,
        );

        let mut rendered = Vec::new();
        for section in Section::plan(report) {
            section.render(&mut cursor, canvas, &ctx)?;
            rendered.push(section.kind());
        }

        let page_count = canvas.page_count();
        debug_assert_eq!(page_count, cursor.page_index() + 1);
        let footer = Section::Footer {
            total_pages: page_count,
        };
        footer.render(&mut cursor, canvas, &ctx)?;
        rendered.push(footer.kind());

        log::debug!(
            "Composed {} sections on {page_count} page(s) with theme {}",
            rendered.len(),
            theme.name
        );

        Ok(Composition {
            sections: rendered,
            page_count,
            filename: self.options.filename_for(report, ext),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slug("Compliance Analyzer"), "compliance-analyzer");
        assert_eq!(slug("  Legal -- Guard!! "), "legal-guard");
        assert_eq!(slug("***"), "report");
    }
}
