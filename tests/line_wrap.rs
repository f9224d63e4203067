use compliance_report::{
    FontSource, FontWeight, TextMeasurer, truncate_with_ellipsis, wrap_text,
};
use proptest::prelude::*;

fn width(text: &str, size: f32) -> f32 {
    FontSource::Standard
        .measure(text, size, FontWeight::Normal)
        .unwrap()
}

#[test]
fn empty_text_has_no_lines() {
    let lines = wrap_text(&FontSource::Standard, "", 200.0, 10.0, FontWeight::Normal).unwrap();
    assert!(lines.is_empty());
    let lines = wrap_text(&FontSource::Standard, "   \n\t ", 200.0, 10.0, FontWeight::Normal).unwrap();
    assert!(lines.is_empty());
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap_text(&FontSource::Standard, "Data retention", 200.0, 10.0, FontWeight::Normal)
        .unwrap();
    assert_eq!(lines, vec!["Data retention".to_string()]);
}

#[test]
fn oversized_word_gets_its_own_line() {
    let long = "Supercalifragilisticexpialidocious";
    let text = format!("a {long} b");
    let max = width(long, 10.0) / 2.0;
    let lines = wrap_text(&FontSource::Standard, &text, max, 10.0, FontWeight::Normal).unwrap();
    assert_eq!(lines, vec!["a".to_string(), long.to_string(), "b".to_string()]);
}

#[test]
fn whitespace_is_collapsed_before_wrapping() {
    let lines = wrap_text(
        &FontSource::Standard,
        "  The   party\n\nshall\tnotify  ",
        500.0,
        10.0,
        FontWeight::Normal,
    )
    .unwrap();
    assert_eq!(lines, vec!["The party shall notify".to_string()]);
}

#[test]
fn unsupported_characters_are_dropped() {
    let lines = wrap_text(
        &FontSource::Standard,
        "Clause \u{4e2d}\u{6587} applies \u{2014} fully",
        500.0,
        10.0,
        FontWeight::Normal,
    )
    .unwrap();
    assert_eq!(lines, vec!["Clause applies \u{2014} fully".to_string()]);
}

#[test]
fn bold_text_wraps_earlier() {
    let text = "Liability is capped at the fees paid in the preceding twelve months";
    let max = width(text, 10.0) * 0.98;
    let regular = wrap_text(&FontSource::Standard, text, max, 10.0, FontWeight::Normal).unwrap();
    let bold = wrap_text(&FontSource::Standard, text, max, 10.0, FontWeight::Bold).unwrap();
    assert_eq!(regular.len(), 2);
    assert!(bold.len() >= regular.len());
}

#[test]
fn truncation_marks_the_cut() {
    assert_eq!(truncate_with_ellipsis("short", 10), "short");
    assert_eq!(truncate_with_ellipsis("abcdefghij", 10), "abcdefghij");
    assert_eq!(truncate_with_ellipsis("abcdefghijk", 10), "abcdefg...");
    // Trailing space before the cut is not kept.
    assert_eq!(truncate_with_ellipsis("abcdef ghijk", 10), "abcdef...");
    assert_eq!(truncate_with_ellipsis(&"x".repeat(500), 300).chars().count(), 300);
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,14}"
}

proptest! {
    /// Every line that holds more than one word fits the width, and wrapping
    /// loses no words.
    #[test]
    fn wrapped_lines_fit(
        words in prop::collection::vec(word(), 0..60),
        max_width in 20.0f32..400.0,
        size in 6.0f32..16.0,
    ) {
        let text = words.join(" ");
        let lines = wrap_text(&FontSource::Standard, &text, max_width, size, FontWeight::Normal)
            .unwrap();
        for line in &lines {
            prop_assert!(!line.is_empty());
            if line.contains(' ') {
                prop_assert!(width(line, size) <= max_width, "{line:?} exceeds {max_width}");
            }
        }
        prop_assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn truncation_never_exceeds_limit(text in ".{0,400}", limit in 4usize..320) {
        let out = truncate_with_ellipsis(&text, limit);
        prop_assert!(out.chars().count() <= limit);
        if text.chars().count() <= limit {
            prop_assert_eq!(out, text);
        } else {
            prop_assert!(out.ends_with("..."));
        }
    }
}
