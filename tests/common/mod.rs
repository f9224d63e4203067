#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use compliance_report::{
    AnalysisReport, Composition, ComplianceIssue, FlaggedClause, FontSource, RecordingCanvas,
    ReportComposer, ReportOptions, RiskScore, Severity, Theme, TrueTypeFace,
};

const FONT_DIRS: &[&str] = &["tests/fixtures/fonts", "/usr/share/fonts/truetype/dejavu"];

/// Load `file` from the first font directory that has it. `None` means the
/// fixture is not installed and the caller should skip.
pub fn fixture_face(file: &str) -> Option<TrueTypeFace> {
    let path: PathBuf = FONT_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(file))
        .find(|p| p.is_file())?;
    Some(TrueTypeFace::from_file(&path).expect("parse font fixture"))
}

/// Options with a fixed timestamp so filenames and output are reproducible.
pub fn options(theme: Theme) -> ReportOptions {
    ReportOptions {
        theme,
        generated_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
        ..ReportOptions::default()
    }
}

pub fn words(n: usize) -> String {
    (0..n)
        .map(|i| ["contract", "party", "shall", "obligation", "notice"][i % 5])
        .collect::<Vec<_>>()
        .join(" ")
}

/// `len` characters of word-like text.
pub fn text_of_len(len: usize) -> String {
    let mut out = String::with_capacity(len + 8);
    let mut i = 0;
    while out.len() < len {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(["indemnify", "liability", "termination", "data"][i % 4]);
        i += 1;
    }
    out.truncate(len);
    out
}

pub fn clause(severity: Severity, text: &str) -> FlaggedClause {
    FlaggedClause {
        clause_text: text.to_string(),
        issue: "Clause may conflict with statutory requirements".to_string(),
        severity,
    }
}

pub fn issue(law: &str, missing: &[&str], recs: &[&str]) -> ComplianceIssue {
    ComplianceIssue {
        law_name: law.to_string(),
        missing_requirements: missing.iter().map(|s| s.to_string()).collect(),
        recommendations: recs.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn risk_score(overall: u8) -> RiskScore {
    RiskScore {
        overall_score: overall,
        financial_risk_estimate: 50_000.0,
        violation_categories: vec!["Data Protection".to_string(), "Employment".to_string()],
        jurisdiction_risks: BTreeMap::from([("MY".to_string(), 12.0), ("SG".to_string(), 2.5)]),
    }
}

pub fn report(jurisdiction: &str) -> AnalysisReport {
    AnalysisReport {
        summary: words(40),
        jurisdiction_code: jurisdiction.to_string(),
        flagged_clauses: Vec::new(),
        compliance_issues: Vec::new(),
        risk_score: None,
    }
}

pub fn report_with_clauses(count: usize, clause_len: usize) -> AnalysisReport {
    let mut r = report("MY");
    r.flagged_clauses = (0..count)
        .map(|i| {
            let severity = [Severity::High, Severity::Medium, Severity::Low][i % 3];
            clause(severity, &text_of_len(clause_len))
        })
        .collect();
    r
}

/// Lay `report` out on a recording canvas with the built-in Helvetica metrics.
pub fn compose(report: &AnalysisReport, opts: &ReportOptions) -> (Composition, RecordingCanvas) {
    let _ = env_logger::try_init();
    let fonts = FontSource::Standard;
    let mut canvas = RecordingCanvas::new();
    let composition = ReportComposer::new(&fonts, opts)
        .compose(report, &mut canvas, "pdf")
        .expect("compose report");
    (composition, canvas)
}

/// Every text drawn, in order, without page or style.
pub fn all_texts(canvas: &RecordingCanvas) -> Vec<String> {
    canvas.texts().map(|(_, t, _)| t.to_string()).collect()
}

pub fn contains_text(canvas: &RecordingCanvas, needle: &str) -> bool {
    canvas.texts().any(|(_, t, _)| t.contains(needle))
}
