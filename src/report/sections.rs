use crate::canvas::{Canvas, Color, RectMode, StyleToken};
use crate::error::Error;
use crate::fonts::{FontWeight, TextMeasurer};
use crate::layout::{ELLIPSIS, LayoutCursor, truncate_with_ellipsis, wrap_text};
use crate::model::{
    AnalysisReport, ComplianceIssue, FlaggedClause, RiskScore, Severity,
    jurisdiction_display_name,
};

use super::ReportOptions;
use super::theme::Theme;

/// Everything a section needs besides the cursor and the canvas.
pub struct SectionContext<'a> {
    pub theme: &'a Theme,
    pub measurer: &'a dyn TextMeasurer,
    pub options: &'a ReportOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    ExecutiveSummary,
    RiskScoreCard,
    FlaggedClauses,
    ComplianceIssues,
    Footer,
}

/// Overall verdict shown in the header badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    Compliant,
    ReviewRecommended,
    ActionRequired,
}

impl ReportStatus {
    pub fn of(report: &AnalysisReport) -> Self {
        if report.highest_severity() == Some(Severity::High) {
            ReportStatus::ActionRequired
        } else if !report.flagged_clauses.is_empty() || !report.compliance_issues.is_empty() {
            ReportStatus::ReviewRecommended
        } else {
            ReportStatus::Compliant
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Compliant => "COMPLIANT",
            ReportStatus::ReviewRecommended => "REVIEW RECOMMENDED",
            ReportStatus::ActionRequired => "ACTION REQUIRED",
        }
    }

    fn color(self, theme: &Theme) -> Color {
        match self {
            ReportStatus::Compliant => theme.palette.affirmative,
            ReportStatus::ReviewRecommended => theme.severity.medium,
            ReportStatus::ActionRequired => theme.severity.high,
        }
    }
}

/// One block of the report, borrowing the slice of analysis data it draws.
#[derive(Clone, Copy, Debug)]
pub enum Section<'a> {
    Header {
        status: ReportStatus,
    },
    ExecutiveSummary {
        summary: &'a str,
        jurisdiction_code: &'a str,
    },
    RiskScoreCard(&'a RiskScore),
    FlaggedClauses(&'a [FlaggedClause]),
    ComplianceIssues(&'a [ComplianceIssue]),
    /// Second pass: stamps every page once the page count is final.
    Footer {
        total_pages: usize,
    },
}

impl<'a> Section<'a> {
    /// First-pass sections of `report` in rendering order.
    pub fn plan(report: &'a AnalysisReport) -> Vec<Section<'a>> {
        let mut sections = vec![
            Section::Header {
                status: ReportStatus::of(report),
            },
            Section::ExecutiveSummary {
                summary: &report.summary,
                jurisdiction_code: &report.jurisdiction_code,
            },
        ];
        if let Some(score) = &report.risk_score {
            sections.push(Section::RiskScoreCard(score));
        }
        sections.push(Section::FlaggedClauses(&report.flagged_clauses));
        sections.push(Section::ComplianceIssues(&report.compliance_issues));
        sections
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Header { .. } => SectionKind::Header,
            Section::ExecutiveSummary { .. } => SectionKind::ExecutiveSummary,
            Section::RiskScoreCard(_) => SectionKind::RiskScoreCard,
            Section::FlaggedClauses(_) => SectionKind::FlaggedClauses,
            Section::ComplianceIssues(_) => SectionKind::ComplianceIssues,
            Section::Footer { .. } => SectionKind::Footer,
        }
    }

    pub fn render(
        &self,
        cursor: &mut LayoutCursor,
        canvas: &mut dyn Canvas,
        ctx: &SectionContext<'_>,
    ) -> Result<(), Error> {
        match *self {
            Section::Header { status } => render_header(cursor, canvas, ctx, status),
            Section::ExecutiveSummary {
                summary,
                jurisdiction_code,
            } => render_summary(cursor, canvas, ctx, summary, jurisdiction_code),
            Section::RiskScoreCard(score) => render_risk_score(cursor, canvas, ctx, score),
            Section::FlaggedClauses(clauses) => render_flagged_clauses(cursor, canvas, ctx, clauses),
            Section::ComplianceIssues(issues) => {
                render_compliance_issues(cursor, canvas, ctx, issues)
            }
            Section::Footer { total_pages } => render_footer(cursor, canvas, ctx, total_pages),
        }
    }
}

/// Baseline that vertically centers text of `font_size` in a box starting at
/// `top` (cap height taken as 0.7em).
fn baseline(top: f32, box_height: f32, font_size: f32) -> f32 {
    top + (box_height + font_size * 0.7) / 2.0
}

/// Draw a single line of text, normalized the same way it is measured.
/// Returns the drawn width.
fn label(
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    x: f32,
    y: f32,
    text: &str,
    style: StyleToken,
) -> Result<f32, Error> {
    let text = ctx.measurer.normalize(text);
    if text.is_empty() {
        return Ok(0.0);
    }
    let width = ctx.measurer.measure(&text, style.font_size, style.weight)?;
    canvas.draw_text(x, y, &text, style)?;
    Ok(width)
}

/// Wrap `text` into `width` and draw it line by line, reserving each line.
fn paragraph(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    x: f32,
    width: f32,
    text: &str,
    style: StyleToken,
) -> Result<usize, Error> {
    let lines = wrap_text(ctx.measurer, text, width, style.font_size, style.weight)?;
    for line in &lines {
        cursor.reserve_line_on(canvas)?;
        let y = baseline(cursor.y(), cursor.line_height(), style.font_size);
        canvas.draw_text(x, y, line, style)?;
        cursor.advance(cursor.line_height());
    }
    Ok(lines.len())
}

/// Section title with a rule underneath, kept on the same page as the
/// `keep_with` points of content that follow it.
fn heading(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    title: &str,
    keep_with: f32,
) -> Result<(), Error> {
    let theme = ctx.theme;
    let height = theme.fonts.heading + theme.block_gap + 4.0;
    cursor.reserve_on(canvas, height + keep_with)?;
    let top = cursor.y();
    label(canvas, ctx, cursor.left(), top + theme.fonts.heading, title, theme.heading())?;
    let rule_y = top + theme.fonts.heading + 4.0;
    canvas.draw_line(cursor.left(), rule_y, cursor.right(), rule_y, theme.palette.border)?;
    cursor.advance(height);
    Ok(())
}

/// Rounded, filled badge with a bold caption. `top` is the badge's upper
/// edge; returns the badge width.
fn badge(
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    x: f32,
    top: f32,
    caption: &str,
    fill: Color,
) -> Result<f32, Error> {
    let theme = ctx.theme;
    let style = theme.badge();
    let caption = ctx.measurer.normalize(caption);
    let text_w = ctx.measurer.measure(&caption, style.font_size, style.weight)?;
    let w = text_w + 2.0 * theme.badge_padding;
    let h = theme.badge_height;
    canvas.draw_rounded_rect(x, top, w, h, theme.corner_radius.min(h / 2.0), fill, RectMode::Fill)?;
    canvas.draw_text(
        x + theme.badge_padding,
        baseline(top, h, style.font_size),
        &caption,
        style,
    )?;
    Ok(w)
}

fn badge_width(ctx: &SectionContext<'_>, caption: &str) -> Result<f32, Error> {
    let style = ctx.theme.badge();
    let caption = ctx.measurer.normalize(caption);
    Ok(ctx.measurer.measure(&caption, style.font_size, style.weight)? + 2.0 * ctx.theme.badge_padding)
}

/// Badges are a single line: cut the caption with an ellipsis until the
/// badge fits `max_width`.
fn fit_badge_caption(
    ctx: &SectionContext<'_>,
    caption: &str,
    max_width: f32,
) -> Result<String, Error> {
    let caption = truncate_with_ellipsis(&ctx.measurer.normalize(caption), ctx.theme.text_char_limit);
    if badge_width(ctx, &caption)? <= max_width {
        return Ok(caption);
    }
    let chars: Vec<char> = caption.chars().collect();
    for keep in (0..chars.len()).rev() {
        let mut cut: String = chars[..keep].iter().collect();
        cut.truncate(cut.trim_end().len());
        cut.push_str(ELLIPSIS);
        if badge_width(ctx, &cut)? <= max_width {
            return Ok(cut);
        }
    }
    Ok(ELLIPSIS.to_string())
}

/// Block shown instead of an empty list.
fn affirmative_block(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    message: &str,
) -> Result<(), Error> {
    let theme = ctx.theme;
    let h = theme.affirmative_height;
    cursor.reserve_on(canvas, h)?;
    let top = cursor.y();
    canvas.draw_rounded_rect(
        cursor.left(),
        top,
        cursor.content_width(),
        h,
        theme.corner_radius,
        theme.palette.affirmative_surface,
        RectMode::Fill,
    )?;
    let style = StyleToken::new(theme.palette.affirmative, theme.fonts.body, FontWeight::Bold);
    label(
        canvas,
        ctx,
        cursor.left() + theme.indent,
        baseline(top, h, style.font_size),
        message,
        style,
    )?;
    cursor.advance(h + theme.block_gap);
    Ok(())
}

fn render_header(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    status: ReportStatus,
) -> Result<(), Error> {
    let theme = ctx.theme;
    let opts = ctx.options;
    let h = theme.header_height;
    let x = cursor.left();

    canvas.draw_filled_rect(0.0, 0.0, cursor.page_width(), h, theme.palette.primary)?;
    label(canvas, ctx, x, h * 0.38, &opts.product_name, theme.title())?;
    let subtitle = StyleToken::new(theme.palette.on_primary, theme.fonts.subtitle, FontWeight::Normal);
    label(canvas, ctx, x, h * 0.62, &opts.report_title, subtitle)?;
    let stamp = format!("Generated {} UTC", opts.generated_at.format("%Y-%m-%d %H:%M"));
    let small = StyleToken::new(theme.palette.on_primary, theme.fonts.small, FontWeight::Normal);
    label(canvas, ctx, x, h * 0.82, &stamp, small)?;

    let status_w = badge_width(ctx, status.label())?;
    badge(
        canvas,
        ctx,
        cursor.right() - status_w,
        (h - theme.badge_height) / 2.0,
        status.label(),
        status.color(theme),
    )?;

    // The banner is drawn on a fresh first page, so it needs no reservation.
    cursor.advance(h + theme.section_gap - cursor.y());
    Ok(())
}

fn render_summary(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    summary: &str,
    jurisdiction_code: &str,
) -> Result<(), Error> {
    let theme = ctx.theme;
    heading(cursor, canvas, ctx, "Executive Summary", theme.badge_height + theme.block_gap)?;

    cursor.reserve_on(canvas, theme.badge_height + theme.block_gap)?;
    let caption = fit_badge_caption(
        ctx,
        &format!("Jurisdiction: {}", jurisdiction_display_name(jurisdiction_code)),
        cursor.content_width(),
    )?;
    badge(canvas, ctx, cursor.left(), cursor.y(), &caption, theme.palette.primary)?;
    cursor.advance(theme.badge_height + theme.block_gap);

    let (left, width) = (cursor.left(), cursor.content_width());
    let lines = paragraph(cursor, canvas, ctx, left, width, summary, theme.body())?;
    if lines == 0 {
        cursor.reserve_line_on(canvas)?;
        let y = baseline(cursor.y(), cursor.line_height(), theme.fonts.small);
        label(canvas, ctx, cursor.left(), y, "No summary provided.", theme.muted())?;
        cursor.advance(cursor.line_height());
    }
    cursor.advance(theme.section_gap);
    Ok(())
}

/// `1234567.891` -> `$1,234,567.89`
pub(crate) fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac}")
}

fn format_risk(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_risk_score(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    score: &RiskScore,
) -> Result<(), Error> {
    let theme = ctx.theme;
    heading(cursor, canvas, ctx, "Risk Assessment", theme.card_height)?;

    let card_h = theme.card_height;
    cursor.reserve_on(canvas, card_h)?;
    let top = cursor.y();
    let left = cursor.left();
    let width = cursor.content_width();
    canvas.draw_rounded_rect(left, top, width, card_h, theme.corner_radius, theme.palette.surface, RectMode::Fill)?;
    canvas.draw_rounded_rect(left, top, width, card_h, theme.corner_radius, theme.palette.border, RectMode::Stroke)?;

    let bucket = theme.score_scale.bucket(score.overall_score);
    let bucket_color = theme.score_colors.color(bucket);
    let r = card_h * 0.32;
    let cx = left + theme.indent + r;
    let cy = top + card_h / 2.0;
    canvas.draw_circle(cx, cy, r, bucket_color)?;

    let score_style = StyleToken::new(theme.palette.on_primary, theme.fonts.score, FontWeight::Bold);
    let score_text = score.overall_score.to_string();
    let score_w = ctx.measurer.measure(&score_text, score_style.font_size, score_style.weight)?;
    canvas.draw_text(cx - score_w / 2.0, cy + score_style.font_size * 0.35, &score_text, score_style)?;

    let tx = cx + r + theme.indent * 1.5;
    let body = theme.body();
    label(
        canvas,
        ctx,
        tx,
        top + card_h * 0.3,
        &format!("Overall compliance score: {}/100", score.overall_score),
        body.with_weight(FontWeight::Bold),
    )?;
    label(
        canvas,
        ctx,
        tx,
        top + card_h * 0.52,
        bucket.label(),
        body.with_color(bucket_color).with_weight(FontWeight::Bold),
    )?;
    label(
        canvas,
        ctx,
        tx,
        top + card_h * 0.74,
        &format!(
            "Estimated financial exposure: {}",
            format_currency(score.financial_risk_estimate, &ctx.options.currency_symbol)
        ),
        body,
    )?;
    cursor.advance(card_h + theme.block_gap);

    let line_h = cursor.line_height();
    cursor.reserve_line_on(canvas)?;
    let caption_y = baseline(cursor.y(), line_h, body.font_size);
    if score.violation_categories.is_empty() {
        label(canvas, ctx, left, caption_y, "No violation categories recorded.", theme.muted())?;
        cursor.advance(line_h);
    } else {
        label(canvas, ctx, left, caption_y, "Violation categories", body.with_weight(FontWeight::Bold))?;
        cursor.advance(line_h);

        let row_gap = theme.block_gap / 2.0;
        let mut x = left;
        for category in &score.violation_categories {
            let caption = fit_badge_caption(ctx, category, cursor.content_width())?;
            let w = badge_width(ctx, &caption)?;
            if x > left && x + w > cursor.right() {
                cursor.advance(theme.badge_height + row_gap);
                x = left;
            }
            if cursor.reserve_on(canvas, theme.badge_height)?.is_some() {
                x = left;
            }
            x += badge(canvas, ctx, x, cursor.y(), &caption, theme.palette.flagged)? + row_gap;
        }
        cursor.advance(theme.badge_height + theme.block_gap);
    }

    if !score.jurisdiction_risks.is_empty() {
        cursor.reserve_line_on(canvas)?;
        let y = baseline(cursor.y(), line_h, body.font_size);
        label(canvas, ctx, left, y, "Risk by jurisdiction", body.with_weight(FontWeight::Bold))?;
        cursor.advance(line_h);
        for (code, risk) in &score.jurisdiction_risks {
            let name = jurisdiction_display_name(code);
            let text = if name == code {
                format!("{code}: {}", format_risk(*risk))
            } else {
                format!("{name} ({code}): {}", format_risk(*risk))
            };
            let indented = left + theme.indent;
            paragraph(cursor, canvas, ctx, indented, width - theme.indent, &text, body)?;
        }
    }

    cursor.advance(theme.section_gap);
    Ok(())
}

fn render_flagged_clauses(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    clauses: &[FlaggedClause],
) -> Result<(), Error> {
    let theme = ctx.theme;
    let first_block = if clauses.is_empty() {
        theme.affirmative_height
    } else {
        theme.row_height
    };
    heading(cursor, canvas, ctx, &format!("Flagged Clauses ({})", clauses.len()), first_block)?;

    if clauses.is_empty() {
        affirmative_block(cursor, canvas, ctx, "No problematic clauses were flagged.")?;
        cursor.advance(theme.section_gap);
        return Ok(());
    }

    let text_x = cursor.left() + theme.indent;
    let text_w = cursor.content_width() - theme.indent;
    let ordinal_style = theme.body().with_weight(FontWeight::Bold);
    let issue_style = StyleToken::new(theme.palette.flagged, theme.fonts.body, FontWeight::Bold);
    let clause_style = StyleToken::new(theme.palette.muted, theme.fonts.body, FontWeight::Italic);

    for (i, clause) in clauses.iter().enumerate() {
        let row_h = theme.row_height;
        cursor.reserve_on(canvas, row_h)?;
        let top = cursor.y();
        let ordinal_w = label(
            canvas,
            ctx,
            cursor.left(),
            baseline(top, row_h, ordinal_style.font_size),
            &format!("Clause {}", i + 1),
            ordinal_style,
        )?;
        badge(
            canvas,
            ctx,
            cursor.left() + ordinal_w + theme.indent,
            top + (row_h - theme.badge_height) / 2.0,
            clause.severity.label(),
            theme.severity.color(clause.severity),
        )?;
        cursor.advance(row_h);

        paragraph(cursor, canvas, ctx, text_x, text_w, &clause.issue, issue_style)?;

        let clause_text = truncate_with_ellipsis(
            &ctx.measurer.normalize(&clause.clause_text),
            theme.text_char_limit,
        );
        paragraph(cursor, canvas, ctx, text_x, text_w, &clause_text, clause_style)?;

        if i + 1 < clauses.len() {
            let gap = theme.block_gap * 2.0;
            cursor.reserve_on(canvas, gap)?;
            let rule_y = cursor.y() + theme.block_gap;
            canvas.draw_line(cursor.left(), rule_y, cursor.right(), rule_y, theme.palette.border)?;
            cursor.advance(gap);
        }
    }

    cursor.advance(theme.section_gap);
    Ok(())
}

fn render_compliance_issues(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    issues: &[ComplianceIssue],
) -> Result<(), Error> {
    let theme = ctx.theme;
    let first_block = if issues.is_empty() {
        theme.affirmative_height
    } else {
        theme.row_height
    };
    heading(cursor, canvas, ctx, &format!("Compliance Issues ({})", issues.len()), first_block)?;

    if issues.is_empty() {
        affirmative_block(cursor, canvas, ctx, "No compliance gaps were identified.")?;
        cursor.advance(theme.section_gap);
        return Ok(());
    }

    let law_style = StyleToken::new(theme.palette.primary, theme.fonts.body, FontWeight::Bold);
    for (i, issue) in issues.iter().enumerate() {
        let law = truncate_with_ellipsis(&ctx.measurer.normalize(&issue.law_name), theme.text_char_limit);
        let title = format!("{}. {law}", i + 1);
        let lines = wrap_text(
            ctx.measurer,
            &title,
            cursor.content_width(),
            law_style.font_size,
            law_style.weight,
        )?;
        // First line takes the full row height, continuation lines one line each.
        for (j, line) in lines.iter().enumerate() {
            let h = if j == 0 {
                theme.row_height
            } else {
                cursor.line_height()
            };
            cursor.reserve_on(canvas, h)?;
            let y = baseline(cursor.y(), h, law_style.font_size);
            canvas.draw_text(cursor.left(), y, line, law_style)?;
            cursor.advance(h);
        }

        bullet_list(
            cursor,
            canvas,
            ctx,
            "Missing requirements",
            &issue.missing_requirements,
            theme.palette.flagged,
        )?;
        bullet_list(
            cursor,
            canvas,
            ctx,
            "Recommendations",
            &issue.recommendations,
            theme.palette.affirmative,
        )?;
        cursor.advance(theme.block_gap);
    }

    cursor.advance(theme.section_gap);
    Ok(())
}

/// Captioned list of bulleted, wrapped items. Every line is reserved on its
/// own so long lists flow across pages.
fn bullet_list(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    caption: &str,
    items: &[String],
    bullet_color: Color,
) -> Result<(), Error> {
    let theme = ctx.theme;
    let line_h = cursor.line_height();
    let body = theme.body();
    let caption_x = cursor.left() + theme.indent;
    let item_x = caption_x + theme.indent;
    let item_w = cursor.right() - item_x;

    cursor.reserve_line_on(canvas)?;
    let y = baseline(cursor.y(), line_h, body.font_size);
    label(canvas, ctx, caption_x, y, caption, body.with_weight(FontWeight::Bold))?;
    cursor.advance(line_h);

    if items.is_empty() {
        cursor.reserve_line_on(canvas)?;
        let y = baseline(cursor.y(), line_h, theme.fonts.small);
        label(canvas, ctx, item_x, y, "None listed.", theme.muted())?;
        cursor.advance(line_h);
        return Ok(());
    }

    let bullet = match ctx.measurer.normalize("\u{2022}") {
        b if b.is_empty() => "-".to_string(),
        b => b,
    };
    let bullet_style = body.with_color(bullet_color).with_weight(FontWeight::Bold);
    for item in items {
        let text = truncate_with_ellipsis(&ctx.measurer.normalize(item), theme.text_char_limit);
        let lines = wrap_text(ctx.measurer, &text, item_w, body.font_size, body.weight)?;
        for (j, line) in lines.iter().enumerate() {
            cursor.reserve_line_on(canvas)?;
            let y = baseline(cursor.y(), line_h, body.font_size);
            if j == 0 {
                canvas.draw_text(caption_x + theme.indent / 2.0, y, &bullet, bullet_style)?;
            }
            canvas.draw_text(item_x, y, line, body)?;
            cursor.advance(line_h);
        }
    }
    Ok(())
}

fn render_footer(
    cursor: &mut LayoutCursor,
    canvas: &mut dyn Canvas,
    ctx: &SectionContext<'_>,
    total_pages: usize,
) -> Result<(), Error> {
    let theme = ctx.theme;
    let style = theme.muted();
    let rule_y = cursor.bottom() + theme.margin * 0.3;
    let text_y = cursor.page_height() - theme.margin * 0.35;

    for page in 0..total_pages {
        canvas.set_active_page(page)?;
        canvas.draw_line(cursor.left(), rule_y, cursor.right(), rule_y, theme.palette.border)?;

        let page_label = format!("Page {} of {}", page + 1, total_pages);
        let label_w = ctx.measurer.measure(&page_label, style.font_size, style.weight)?;
        canvas.draw_text(cursor.right() - label_w, text_y, &page_label, style)?;

        let notice_w = cursor.content_width() - label_w - theme.indent;
        let notice = wrap_text(
            ctx.measurer,
            &ctx.options.confidentiality_notice,
            notice_w,
            style.font_size,
            style.weight,
        )?;
        if let Some(first) = notice.first() {
            let text = if notice.len() > 1 {
                format!("{first}...")
            } else {
                first.clone()
            };
            canvas.draw_text(cursor.left(), text_y, &text, style)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(1234567.891, "$"), "$1,234,567.89");
        assert_eq!(format_currency(999.5, "RM "), "RM 999.50");
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(100000.0, "$"), "$100,000.00");
    }

    #[test]
    fn risk_values_drop_zero_fraction() {
        assert_eq!(format_risk(12.0), "12");
        assert_eq!(format_risk(2.5), "2.5");
    }
}
