//! Icon markup sanitizer
//!
//! Strips a fixed set of known-dangerous patterns from user-supplied SVG
//! icon markup. This is a textual filter, not a markup parser: the output is
//! free of the patterns below but is not guaranteed to be safe to render.

use regex::Regex;
use std::sync::LazyLock;

/// Inline event handler attributes such as `onload="..."` or `onclick='...'`
///
/// Word characters and boundaries here are ASCII-only.
static EVENT_HANDLER_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)on(?-u:\w)+\s*=\s*["'][^"']*["']"#).expect("event handler pattern is valid")
});

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("javascript pattern is valid"));

static HTML_DATA_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)data:text/html").expect("data uri pattern is valid"));

/// `<script ...>...</script>` up to the first closing tag, across lines
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script(?-u:\b).*?</script>").expect("script block pattern is valid")
});

/// Sanitize icon markup.
///
/// Applies the four removal rules in order (event handler attributes,
/// `javascript:`, `data:text/html`, `<script>` blocks) and repeats the pass
/// until nothing changes, so `sanitize_icon(&sanitize_icon(x)) == sanitize_icon(x)`.
/// Inputs where removing one match assembles another (`javajavascript:script:`)
/// are therefore cleaned completely rather than left with a fresh match.
pub fn sanitize_icon(icon: &str) -> String {
    let mut current = strip_once(icon);
    loop {
        let next = strip_once(&current);
        // Every rule only removes non-empty matches, so each changing pass
        // shortens the string and the loop terminates.
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(input: &str) -> String {
    let without_handlers = EVENT_HANDLER_ATTR.replace_all(input, "");
    let without_js = JAVASCRIPT_SCHEME.replace_all(&without_handlers, "");
    let without_data = HTML_DATA_URI.replace_all(&without_js, "");
    SCRIPT_BLOCK.replace_all(&without_data, "").into_owned()
}
