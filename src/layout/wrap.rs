use crate::error::Error;
use crate::fonts::{FontWeight, TextMeasurer};

pub const ELLIPSIS: &str = "...";

/// Greedy word wrap.
///
/// The text is normalized by the measurer first, so every returned line is
/// exactly what will be drawn. Words are never split: a word wider than
/// `max_width` gets a line of its own and overflows. Empty input yields no
/// lines.
pub fn wrap_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    max_width: f32,
    font_size: f32,
    weight: FontWeight,
) -> Result<Vec<String>, Error> {
    let normalized = measurer.normalize(text);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in normalized.split(' ') {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_len = current.len();
        current.push(' ');
        current.push_str(word);
        if measurer.measure(&current, font_size, weight)? > max_width {
            current.truncate(candidate_len);
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    for line in &lines {
        if !line.contains(' ') && measurer.measure(line, font_size, weight)? > max_width {
            log::debug!("Word wider than {max_width:.1}pt left overflowing: {line:?}");
        }
    }
    Ok(lines)
}

/// Cut `text` to at most `max_chars` characters, marking the cut with
/// [`ELLIPSIS`]. The result including the marker never exceeds `max_chars`
/// (unless `max_chars` is shorter than the marker itself).
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}
