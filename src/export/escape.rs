//! Escaping helpers for plain-text values interpolated into markup.

use crate::sanitize::{is_safe_url, UrlContext};

/// HTML-escape a plain-text value for text or attribute context.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Make a URL safe inside a single-quoted CSS `url('…')`.
///
/// Characters that could close the string or the function are
/// percent-encoded; whitespace and control characters are removed.
pub fn css_url_escape(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            c if c.is_whitespace() || c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// An image source worth rendering: non-blank and with an image-safe scheme.
pub fn usable_image_src(src: &str) -> Option<&str> {
    let trimmed = src.trim();
    if trimmed.is_empty() || !is_safe_url(trimmed, UrlContext::Image) {
        None
    } else {
        Some(trimmed)
    }
}

/// A link target: blank or script-bearing URLs become `#`.
pub fn usable_link_href(url: &str) -> &str {
    let trimmed = url.trim();
    if trimmed.is_empty() || !is_safe_url(trimmed, UrlContext::Link) {
        "#"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Hello"), "Hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_css_url_escape() {
        assert_eq!(
            css_url_escape("https://x.example/a b'(c)\\"),
            "https://x.example/ab%27%28c%29%5C"
        );
        assert_eq!(css_url_escape("data:image/png;base64,AA=="), "data:image/png;base64,AA==");
    }

    #[test]
    fn test_usable_image_src() {
        assert_eq!(usable_image_src(""), None);
        assert_eq!(usable_image_src("   "), None);
        assert_eq!(usable_image_src("javascript:alert(1)"), None);
        assert_eq!(
            usable_image_src("data:image/jpeg;base64,AA"),
            Some("data:image/jpeg;base64,AA")
        );
    }

    #[test]
    fn test_usable_link_href() {
        assert_eq!(usable_link_href(""), "#");
        assert_eq!(usable_link_href("javascript:void(0)"), "#");
        assert_eq!(usable_link_href(" https://calm.example.com "), "https://calm.example.com");
    }
}
