// src/services/formatter.rs
//! Light markdown-style formatting of message text into display HTML.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(https?://[^\s<]+)").unwrap());

#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter {
    escape_html: bool,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

impl MessageFormatter {
    pub fn new(escape_html: bool) -> Self {
        Self { escape_html }
    }

    /// Applies bold, italic, code, line-break and link substitutions, in that order.
    pub fn format(&self, text: &str) -> String {
        let escaped;
        let source = if self.escape_html {
            escaped = escape_html(text);
            escaped.as_str()
        } else {
            text
        };

        let out = BOLD_RE.replace_all(source, "<strong>${1}</strong>");
        let out = ITALIC_RE.replace_all(&out, "<em>${1}</em>");
        let out = CODE_RE.replace_all(&out, "<code>${1}</code>");
        let out = out.replace('\n', "<br>");
        URL_RE
            .replace_all(&out, r#"<a href="${1}" target="_blank" rel="noopener">${1}</a>"#)
            .into_owned()
    }
}

/// Formats with HTML escaping enabled.
pub fn format_message(text: &str) -> String {
    MessageFormatter::default().format(text)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_all_substitutions() {
        let html = format_message("**a** *b* `c`\nhttp://x");
        assert!(html.contains("<strong>a</strong>"));
        assert!(html.contains("<em>b</em>"));
        assert!(html.contains("<code>c</code>"));
        assert!(html.contains("<br>"));
        assert!(html.contains(r#"<a href="http://x" target="_blank" rel="noopener">http://x</a>"#));
    }

    #[test]
    fn escapes_markup_before_substituting() {
        let html = format_message("<script>alert(1)</script> **ok**");
        assert!(!html.contains("<script>"));
        assert!(html.starts_with("&lt;script&gt;"));
        assert!(html.contains("<strong>ok</strong>"));
    }

    #[test]
    fn raw_mode_passes_markup_through() {
        let html = MessageFormatter::new(false).format("<b>x</b> *y*");
        assert_eq!(html, "<b>x</b> <em>y</em>");
    }

    #[test]
    fn link_stops_before_line_break() {
        let html = format_message("see https://example.com/a?b=1\nnext");
        assert!(html.contains(r#"href="https://example.com/a?b=1""#));
        assert!(html.ends_with("</a><br>next"));
    }

    #[test]
    fn markers_do_not_span_lines() {
        let html = format_message("*a\nb*");
        assert_eq!(html, "*a<br>b*");
    }
}
