//! Free-text cleanup applied to every field before emission.
//!
//! Upstream descriptions arrive as raw storefront HTML with embedded
//! control characters, non-breaking spaces, and arbitrarily long bodies.
//! Every exported cell must be safe to serialize into a CSV cell and
//! display in a table, so text passes through some or all of: tag
//! stripping, control-character removal, whitespace collapsing, and
//! length truncation.

use scraper::Html;

/// Maximum character length of a sanitized text field. Longer values are
/// truncated and marked with [`TRUNCATION_MARKER`].
pub const MAX_TEXT_LEN: usize = 200;

/// Appended to truncated text.
pub const TRUNCATION_MARKER: &str = "...";

/// Extracts the visible text content of an HTML fragment, discarding all
/// markup. Invalid markup is handled by the parser's error recovery, so
/// this never fails; malformed input degrades to whatever text the
/// parser can salvage.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}

/// Removes control characters, keeping tab, newline, and carriage return.
///
/// Used on the raw `Body (HTML)` passthrough, where markup and line
/// structure must survive but stray control bytes would corrupt the
/// export.
#[must_use]
pub fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Collapses every run of whitespace (including tabs and newlines) to a
/// single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to `max` characters, appending [`TRUNCATION_MARKER`] when
/// anything was cut. Operates on characters, not bytes, so multibyte
/// text is never split mid-codepoint.
#[must_use]
pub fn truncate_chars(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        return input.to_owned();
    }
    let mut out: String = input.chars().take(max).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Cleans a plain-text field: control characters out, whitespace
/// collapsed, ends trimmed. No tag stripping, no truncation.
#[must_use]
pub fn clean_text(input: &str) -> String {
    collapse_whitespace(&strip_control_chars(input))
}

/// The full pipeline for HTML-derived description text: strip markup,
/// drop control characters, collapse whitespace, truncate to
/// [`MAX_TEXT_LEN`].
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    truncate_chars(&clean_text(&strip_html(input)), MAX_TEXT_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_extracts_nested_text() {
        let html = "<div><p>Hello <strong>world</strong></p><ul><li>one</li></ul></div>";
        assert_eq!(collapse_whitespace(&strip_html(html)), "Hello world one");
    }

    #[test]
    fn strip_html_passes_plain_text_through() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn strip_html_survives_unclosed_tags() {
        let text = strip_html("<p>broken <em>markup");
        assert!(text.contains("broken"));
        assert!(text.contains("markup"));
    }

    #[test]
    fn strip_control_chars_keeps_whitespace_controls() {
        let input = "a\u{0}b\tc\nd\re\u{7f}f";
        assert_eq!(strip_control_chars(input), "ab\tc\nd\ref");
    }

    #[test]
    fn collapse_whitespace_flattens_runs() {
        assert_eq!(collapse_whitespace("  a \t\t b\n\nc  "), "a b c");
    }

    #[test]
    fn truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn truncate_chars_appends_marker() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        // 4 three-byte characters; a byte-based cut at 3 would panic.
        let input = "日本語方";
        assert_eq!(truncate_chars(input, 3), "日本語...");
    }

    #[test]
    fn sanitize_text_full_pipeline() {
        let html = "<p>  A   fine\u{0} <b>product</b>\n\n description </p>";
        assert_eq!(sanitize_text(html), "A fine product description");
    }

    #[test]
    fn sanitize_text_truncates_long_descriptions() {
        let html = format!("<p>{}</p>", "x".repeat(300));
        let out = sanitize_text(&html);
        assert_eq!(out.chars().count(), MAX_TEXT_LEN + TRUNCATION_MARKER.len());
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn sanitize_text_empty_input() {
        assert_eq!(sanitize_text(""), "");
    }
}
