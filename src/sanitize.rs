//! Rich-Text Sanitizer
//!
//! Rich-text fields come from a WYSIWYG editor and are untrusted. Before any
//! of them is embedded in exported markup it is parsed as an HTML fragment,
//! filtered against a fixed allow-list of elements and attributes, and
//! serialized again.
//!
//! Disallowed elements are unwrapped (their children are kept), except for
//! elements whose content is never displayable text, such as `script` or
//! `style`, which are removed together with their content.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_fragment, LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Allow-lists
// ─────────────────────────────────────────────────────────────────────────────

/// Elements that survive sanitizing.
pub const ALLOWED_TAGS: &[&str] = &[
    "a",
    "b",
    "blockquote",
    "br",
    "code",
    "div",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "img",
    "li",
    "ol",
    "p",
    "pre",
    "span",
    "strong",
    "sub",
    "sup",
    "table",
    "tbody",
    "td",
    "th",
    "thead",
    "tr",
    "u",
    "ul",
];

/// Attributes that survive sanitizing, on any allowed element.
pub const ALLOWED_ATTRIBUTES: &[&str] =
    &["href", "title", "alt", "src", "target", "rel", "style"];

/// Elements removed together with everything inside them.
const DROP_WITH_CONTENT: &[&str] = &[
    "script", "style", "template", "iframe", "object", "embed", "noscript", "noembed", "noframes",
    "xmp", "frameset", "title", "textarea", "select", "svg", "math",
];

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Upper bound on parse/serialize passes while waiting for a stable result.
const MAX_PASSES: usize = 4;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn unsafe_style_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)expression\s*\(|javascript\s*:|vbscript\s*:|behavior\s*:|-moz-binding|@import")
            .expect("style pattern is a valid regex")
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// URL checks
// ─────────────────────────────────────────────────────────────────────────────

/// Where a URL is going to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlContext {
    /// Link target (`href`)
    Link,
    /// Image source (`src`, CSS background)
    Image,
}

/// Check a URL against the schemes allowed for its context.
///
/// Relative URLs are allowed everywhere. Links accept `http`, `https`,
/// `mailto` and `tel`; images accept `http`, `https` and `data:image/*`.
pub fn is_safe_url(value: &str, context: UrlContext) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let scheme_end = match normalized.find(':') {
        Some(idx) => idx,
        None => return true,
    };
    if normalized[..scheme_end].contains(|c| matches!(c, '/' | '?' | '#')) {
        return true;
    }

    match (&normalized[..scheme_end], context) {
        ("http" | "https", _) => true,
        ("mailto" | "tel", UrlContext::Link) => true,
        ("data", UrlContext::Image) => normalized.starts_with("data:image/"),
        _ => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Sanitize an untrusted HTML fragment.
///
/// The result only contains [`ALLOWED_TAGS`] carrying [`ALLOWED_ATTRIBUTES`],
/// and `sanitize(&sanitize(x)) == sanitize(x)` holds for every input.
pub fn sanitize(fragment: &str) -> String {
    let mut current = sanitize_pass(fragment);
    // Unwrapping can leave markup the parser would restructure on the next
    // read, so re-run until the output is stable.
    for _ in 1..MAX_PASSES {
        let next = sanitize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Sanitize a loosely typed value; anything that is not a string yields `""`.
pub fn sanitize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => sanitize(s),
        _ => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing and serialization
// ─────────────────────────────────────────────────────────────────────────────

fn sanitize_pass(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return String::new();
    }

    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(fragment);

    let mut out = String::with_capacity(fragment.len());
    // Fragment parsing puts everything under a synthetic <html> root.
    for root in dom.document.children.borrow().iter() {
        write_children(root, &mut out);
    }
    out
}

fn write_children(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        write_node(child, out);
    }
}

fn write_node(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => escape_text(&contents.borrow(), out),
        NodeData::Element { name, attrs, .. } => {
            let tag: &str = &name.local;
            if DROP_WITH_CONTENT.contains(&tag) {
                return;
            }
            if &*name.ns != HTML_NAMESPACE || !ALLOWED_TAGS.contains(&tag) {
                write_children(node, out);
                return;
            }

            out.push('<');
            out.push_str(tag);
            for attr in attrs.borrow().iter() {
                let attr_name: &str = &attr.name.local;
                if attr.name.ns.is_empty() && is_allowed_attribute(attr_name, &attr.value) {
                    out.push(' ');
                    out.push_str(attr_name);
                    out.push_str("=\"");
                    escape_attribute(&attr.value, out);
                    out.push('"');
                }
            }
            out.push('>');

            if VOID_TAGS.contains(&tag) {
                return;
            }
            if tag == "pre" && starts_with_newline(node) {
                // The parser swallows one leading newline after <pre>.
                out.push('\n');
            }
            write_children(node, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        // Comments, doctypes and processing instructions are dropped.
        _ => {}
    }
}

fn is_allowed_attribute(name: &str, value: &str) -> bool {
    if !ALLOWED_ATTRIBUTES.contains(&name) {
        return false;
    }
    match name {
        "href" => is_safe_url(value, UrlContext::Link),
        "src" => is_safe_url(value, UrlContext::Image),
        "style" => !unsafe_style_pattern().is_match(value),
        _ => true,
    }
}

fn starts_with_newline(node: &Handle) -> bool {
    node.children
        .borrow()
        .first()
        .map(|first| match &first.data {
            NodeData::Text { contents } => contents.borrow().starts_with('\n'),
            _ => false,
        })
        .unwrap_or(false)
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_allowed_markup_is_unchanged() {
        let html = r#"<p>Hello <strong>team</strong>, see <a href="https://calm.example.com" target="_blank" rel="noopener">CALM</a>.</p><ul><li><em>one</em></li><li>two</li></ul>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_script_tag_removed_with_content() {
        let out = sanitize("<p>Hi</p><script>alert('x')</script>");
        assert_eq!(out, "<p>Hi</p>");
    }

    #[test]
    fn test_event_handler_attribute_dropped() {
        let out = sanitize(r#"<img src="https://example.com/a.png" onerror="alert(1)" alt="a">"#);
        assert_eq!(out, r#"<img src="https://example.com/a.png" alt="a">"#);
    }

    #[test]
    fn test_javascript_href_dropped() {
        let out = sanitize(r#"<a href="javascript:alert(1)">click</a>"#);
        assert_eq!(out, "<a>click</a>");

        let out = sanitize("<a href=\" JaVa\tScript:alert(1)\">click</a>");
        assert_eq!(out, "<a>click</a>");
    }

    #[test]
    fn test_disallowed_tag_is_unwrapped() {
        let out = sanitize(r#"<p><font color="red">warm</font> regards</p>"#);
        assert_eq!(out, "<p>warm regards</p>");
    }

    #[test]
    fn test_disallowed_attribute_dropped() {
        let out = sanitize(r#"<p class="ql-align-center" id="x" style="color:red">t</p>"#);
        assert_eq!(out, r#"<p style="color:red">t</p>"#);
    }

    #[test]
    fn test_unsafe_style_dropped() {
        let out = sanitize(r#"<span style="width: expression(alert(1))">t</span>"#);
        assert_eq!(out, "<span>t</span>");
    }

    #[test]
    fn test_comments_dropped() {
        assert_eq!(sanitize("<p>a<!-- hidden --></p>"), "<p>a</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(sanitize("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
    }

    #[test]
    fn test_data_image_src_allowed_but_not_other_data() {
        let ok = r#"<img src="data:image/png;base64,AAAA">"#;
        assert_eq!(sanitize(ok), ok);
        let out = sanitize(r#"<img src="data:text/html;base64,PHNjcmlwdD4=">"#);
        assert_eq!(out, "<img>");
    }

    #[test]
    fn test_table_markup_kept() {
        let html = "<table><thead><tr><th>Team</th></tr></thead><tbody><tr><td>Ops</td></tr></tbody></table>";
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_pre_leading_newline_survives_round_trip() {
        let once = sanitize("<pre>\n\nindented</pre>");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n"), "");
    }

    #[test]
    fn test_sanitize_value_non_string_is_empty() {
        assert_eq!(sanitize_value(&serde_json::json!(42)), "");
        assert_eq!(sanitize_value(&serde_json::Value::Null), "");
        assert_eq!(sanitize_value(&serde_json::json!({"html": "<p>x</p>"})), "");
        assert_eq!(sanitize_value(&serde_json::json!("<p>x</p>")), "<p>x</p>");
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("https://example.com", UrlContext::Link));
        assert!(is_safe_url("/relative/path", UrlContext::Link));
        assert!(is_safe_url("mailto:hr@example.com", UrlContext::Link));
        assert!(!is_safe_url("javascript:alert(1)", UrlContext::Link));
        assert!(!is_safe_url("data:image/png;base64,AA", UrlContext::Link));
        assert!(is_safe_url("data:image/png;base64,AA", UrlContext::Image));
        assert!(!is_safe_url("mailto:x@example.com", UrlContext::Image));
    }

    fn fragment_piece() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9 .,&<>]{0,12}",
            Just("<p>".to_string()),
            Just("</p>".to_string()),
            Just("<strong>".to_string()),
            Just("</strong>".to_string()),
            Just("<em>".to_string()),
            Just("<span style=\"color:red\">".to_string()),
            Just("</span>".to_string()),
            Just("<ul><li>".to_string()),
            Just("</li></ul>".to_string()),
            Just("<br>".to_string()),
            Just("<font>".to_string()),
            Just("</font>".to_string()),
            Just("<a href=\"javascript:alert(1)\" onclick=\"x()\">".to_string()),
            Just("<a href=\"https://example.com\">".to_string()),
            Just("</a>".to_string()),
            Just("<script>alert(1)</script>".to_string()),
            Just("<img src=x onerror=alert(1)>".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(pieces in prop::collection::vec(fragment_piece(), 0..16)) {
            let input = pieces.concat();
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn sanitize_output_has_no_script_constructs(pieces in prop::collection::vec(fragment_piece(), 0..16)) {
            let out = sanitize(&pieces.concat()).to_ascii_lowercase();
            prop_assert!(!out.contains("<script"));
            prop_assert!(!out.contains("onerror="));
            prop_assert!(!out.contains("onclick="));
            prop_assert!(!out.contains("javascript:"));
        }
    }
}
