mod common;

use compliance_report::{SectionKind, Theme};

use common::{compose, options};

/// `Page i of N` labels per page.
fn footer_labels(canvas: &compliance_report::RecordingCanvas) -> Vec<(usize, String)> {
    canvas
        .texts()
        .filter(|(_, t, _)| t.starts_with("Page ") && t.contains(" of "))
        .map(|(page, t, _)| (page, t.to_string()))
        .collect()
}

#[test]
fn fifty_long_clauses_span_several_pages() {
    let report = common::report_with_clauses(50, 500);
    for theme in [Theme::classic(), Theme::dashboard()] {
        let (composition, canvas) = compose(&report, &options(theme));
        let n = composition.page_count;
        assert!(n > 1, "expected several pages, got {n}");

        let labels = footer_labels(&canvas);
        assert_eq!(labels.len(), n);
        for (i, (page, text)) in labels.iter().enumerate() {
            assert_eq!(*page, i);
            assert_eq!(text, &format!("Page {} of {n}", i + 1));
        }
        assert_eq!(composition.sections.last(), Some(&SectionKind::Footer));
    }
}

#[test]
fn every_clause_is_drawn_once_in_order() {
    let report = common::report_with_clauses(50, 500);
    let (_, canvas) = compose(&report, &options(Theme::default()));
    let mut last_page = 0;
    for i in 1..=50 {
        let pages = canvas.pages_with_text(&format!("Clause {i}"));
        assert_eq!(pages.len(), 1, "Clause {i} drawn {} times", pages.len());
        assert!(pages[0] >= last_page);
        last_page = pages[0];
    }
    assert!(last_page > 0);
}

#[test]
fn page_count_is_deterministic() {
    let report = common::report_with_clauses(30, 400);
    let opts = options(Theme::default());
    let (first, first_canvas) = compose(&report, &opts);
    let (second, second_canvas) = compose(&report, &opts);
    assert_eq!(first, second);
    assert_eq!(common::all_texts(&first_canvas), common::all_texts(&second_canvas));
}

#[test]
fn page_count_grows_with_clause_count() {
    let opts = options(Theme::default());
    let mut previous = 0;
    for count in [0, 1, 5, 10, 20, 40, 80] {
        let (composition, _) = compose(&common::report_with_clauses(count, 300), &opts);
        assert!(
            composition.page_count >= previous,
            "{count} clauses gave {} pages after {previous}",
            composition.page_count
        );
        previous = composition.page_count;
    }
    assert!(previous > 1);
}

#[test]
fn long_requirement_lists_flow_across_pages() {
    let mut report = common::report("SG");
    let missing: Vec<String> = (0..120)
        .map(|i| format!("Requirement {i}: {}", common::words(12)))
        .collect();
    let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
    report.compliance_issues = vec![common::issue("Personal Data Protection Act 2012", &missing, &[])];
    let (composition, canvas) = compose(&report, &options(Theme::default()));
    assert!(composition.page_count > 1);
    assert_eq!(footer_labels(&canvas).len(), composition.page_count);

    let first = canvas.texts().find(|(_, t, _)| t.starts_with("Requirement 0:")).unwrap();
    let last = canvas.texts().find(|(_, t, _)| t.starts_with("Requirement 119:")).unwrap();
    assert!(last.0 > first.0);
}

#[test]
fn section_heading_stays_with_its_first_row() {
    let opts = options(Theme::default());
    for count in 1..40 {
        let mut report = common::report_with_clauses(count, 180);
        report.compliance_issues = vec![common::issue("Employment Act 1955", &["Overtime rate"], &[])];
        let (_, canvas) = compose(&report, &opts);

        let heading = canvas.pages_with_text("Compliance Issues (1)");
        let row = canvas.pages_with_text("1. Employment Act 1955");
        assert_eq!(heading.len(), 1);
        assert_eq!(heading, row, "heading split from its first row with {count} clauses");
    }
}
