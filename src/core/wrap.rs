//! Column-aware text layout: word wrapping, comment blocks, flower boxes.

use super::format::DocFormat;

/// The VHDL single-line comment marker followed by one space.
pub const COMMENT_STR: &str = "-- ";

/// Measures the rendered column count of `s`.
fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Wraps `text` at word boundaries so that no produced line exceeds
/// `width` columns, reusing `prefix` at the start of every line.
///
/// A single word longer than the space remaining after `prefix` is emitted
/// alone on its own line without truncation.
pub fn wrap_line(text: &str, prefix: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::from(prefix);
    let mut filled = false;
    for word in text.split_whitespace() {
        // break before the word that would overflow the line
        if filled == true && width_of(&current) + 1 + width_of(word) > width {
            lines.push(current);
            current = String::from(prefix);
            filled = false;
        }
        if filled == true {
            current.push(' ');
        }
        current.push_str(word);
        filled = true;
    }
    lines.push(current.trim_end().to_string());
    lines
}

/// Emits `text` indented to `level`, wrapping only when the line would
/// overflow the configured width.
///
/// Wrapping collapses internal whitespace runs, so already-aligned text is
/// kept verbatim whenever it fits.
pub fn push_line(lines: &mut Vec<String>, text: &str, level: usize, fmt: &DocFormat) -> () {
    let indent = fmt.get_indent(level);
    let full = format!("{}{}", indent, text);
    if width_of(&full) <= fmt.get_line_width() || text.split_whitespace().nth(1).is_none() {
        lines.push(full.trim_end().to_string());
    } else {
        lines.append(&mut wrap_line(text, &indent, fmt.get_line_width()));
    }
}

/// Renders `text` as wrapped comment lines nested `level` steps deep.
pub fn comment_lines(text: &str, level: usize, fmt: &DocFormat) -> Vec<String> {
    let prefix = format!("{}{}", fmt.get_indent(level), COMMENT_STR);
    wrap_line(text, &prefix, fmt.get_line_width())
}

/// Renders a documentation block: the one-line `name - description` comment
/// plus any remark lines, framed by flower-box borders when configured.
pub fn comment_block(doc: &str, remarks: Option<&str>, level: usize, fmt: &DocFormat) -> Vec<String> {
    let mut lines = Vec::new();
    let border = flower_border(level, fmt);
    if let Some(b) = &border {
        lines.push(b.clone());
    }
    lines.append(&mut comment_lines(doc, level, fmt));
    if let Some(remarks) = remarks {
        for raw in remarks.lines() {
            lines.append(&mut comment_lines(raw, level, fmt));
        }
    }
    if let Some(b) = border {
        lines.push(b);
    }
    lines
}

/// Builds the decorative border line framing a documentation block.
fn flower_border(level: usize, fmt: &DocFormat) -> Option<String> {
    let c = fmt.get_flower_box_char()?;
    let lead = format!("{}--", fmt.get_indent(level));
    let count = fmt.get_line_width().saturating_sub(width_of(&lead));
    Some(format!(
        "{}{}",
        lead,
        std::iter::repeat(c).take(count).collect::<String>()
    ))
}

/// Determines the length of the longest identifier.
pub fn longest_identifier<'a>(ids: impl Iterator<Item = &'a str>) -> usize {
    ids.map(|id| width_of(id)).max().unwrap_or(0)
}
