//! Email HTML Export
//!
//! This module turns a content model into a complete, self-contained HTML
//! email document. Email clients do not reliably support stylesheets or
//! modern layout, so the document uses nested tables and every visual rule
//! is an inline `style` attribute.
//!
//! Rich-text fields always pass through [`sanitize`]; plain-text fields are
//! escaped. Rendering is pure and deterministic: the same model always gives
//! byte-identical output.

use super::escape::{css_url_escape, html_escape, usable_image_src, usable_link_href};
use crate::config::Branding;
use crate::model::{ContentModel, ImageField, QuickLink};
use crate::sanitize::sanitize;

const FONT_STACK: &str = "system-ui,-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif";
const BODY_TEXT_STYLE: &str = "font-size:14px;color:#111827;line-height:1.6;";
const IMAGE_BASE_STYLE: &str = "display:block;border-radius:12px;border:1px solid #e5e7eb;";

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// Render the email document with the default branding.
pub fn render_email_html(model: &ContentModel) -> String {
    render_email_html_with(model, &Branding::default())
}

/// Render the email document.
///
/// # Arguments
///
/// * `model` - The issue content
/// * `branding` - Headings, sign-off, footer and logo fallback
///
/// # Returns
///
/// The trimmed document, ready to paste into an HTML email composer.
pub fn render_email_html_with(model: &ContentModel, branding: &Branding) -> String {
    let logo_src = usable_image_src(&model.logo_url)
        .unwrap_or(branding.placeholder_logo_url.as_str());

    let html = format!(
        r#"
<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8" />
  <title>{name} - {edition}</title>
</head>
<body style="margin:0;padding:0;background-color:#f3f4f6;">
  <table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%">
    <tr>
      <td align="center" style="padding:24px 8px;">
        <table role="presentation" cellpadding="0" cellspacing="0" border="0" width="100%" style="max-width:700px;border-radius:12px;overflow:hidden;position:relative;">
{background}          <tr>
            <td style="position:relative;background:#ffffff;background-color:rgba(255,255,255,0.9);">
{header}
              <table role="presentation" width="100%" style="font-family:{font};{body_text}padding:24px;">
                <tr>
                  <td>
{leadership}
{announcements_compliance}
{safety}
{special}
{csr}
{events}
{wins_useful}
{quick_links}
{footer}
                  </td>
                </tr>
              </table>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#,
        name = html_escape(&model.newsletter_name),
        edition = html_escape(&model.edition),
        background = background_layer(model),
        header = header(model, branding, logo_src),
        font = FONT_STACK,
        body_text = BODY_TEXT_STYLE,
        leadership = leadership_section(model, branding),
        announcements_compliance = announcements_and_compliance(model, branding),
        safety = boxed_section(
            &branding.headings.safety,
            "#15803d",
            "border:1px solid #bbf7d0;background:#ecfdf5;",
            &model.safety_reminders_html,
        ),
        special = boxed_section(
            &branding.headings.special_message,
            "#c2410c",
            "border:1px solid #fed7aa;background:#fff7ed;",
            &model.special_message_html,
        ),
        csr = section_with_image_column(
            &branding.headings.csr,
            &model.csr_html,
            [
                (model.image(ImageField::Csr1), ImageField::Csr1),
                (model.image(ImageField::Csr2), ImageField::Csr2),
            ],
        ),
        events = section_with_image_column(
            &branding.headings.events,
            &model.employee_events_html,
            [
                (model.image(ImageField::Events1), ImageField::Events1),
                (model.image(ImageField::Events2), ImageField::Events2),
            ],
        ),
        wins_useful = two_column(
            half_card(
                &branding.headings.wins,
                "#4b5563",
                "border:1px solid #e5e7eb;background:#f9fafb;",
                &sanitize(&model.wins_and_shoutouts_html),
                "",
            ),
            half_card(
                &branding.headings.useful_info,
                "#4b5563",
                "border:1px solid #e5e7eb;background:#f9fafb;",
                &sanitize(&model.useful_info_html),
                "",
            ),
        ),
        quick_links = quick_links_section(&model.quick_links, branding),
        footer = footer(branding),
    );

    html.trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Building blocks
// ─────────────────────────────────────────────────────────────────────────────

/// Background layer row, or nothing when the issue has no usable background.
fn background_layer(model: &ContentModel) -> String {
    let Some(src) = usable_image_src(&model.background_image) else {
        return String::new();
    };
    let mode = model.background_mode;
    format!(
        r#"          <tr>
            <td style="background-image:url('{url}');background-repeat:{repeat};background-size:{size};background-position:center;position:absolute;inset:0;opacity:{opacity};filter:brightness(1);"></td>
          </tr>
"#,
        url = html_escape(&css_url_escape(src)),
        repeat = mode.css_repeat(),
        size = mode.css_size(),
        opacity = model.effective_background_opacity(),
    )
}

fn header(model: &ContentModel, branding: &Branding, logo_src: &str) -> String {
    format!(
        r#"              <table role="presentation" width="100%" style="background:linear-gradient(90deg,#0f172a,#1d4ed8);">
                <tr>
                  <td style="padding:16px 24px;color:#e5e7eb;font-family:{font};">
                    <table role="presentation" width="100%">
                      <tr>
                        <td style="vertical-align:middle;">
                          <img src="{logo}" alt="{logo_alt}" style="display:block;max-height:60px;border-radius:4px;" />
                        </td>
                        <td style="text-align:right;vertical-align:middle;">
                          <div style="font-size:11px;letter-spacing:0.12em;text-transform:uppercase;opacity:0.8;">{name}</div>
                          <div style="font-size:18px;font-weight:600;">{title}</div>
                          <div style="font-size:12px;opacity:0.8;">Edition: {edition}</div>
                        </td>
                      </tr>
                    </table>
                  </td>
                </tr>
              </table>"#,
        font = FONT_STACK,
        logo = html_escape(logo_src),
        logo_alt = html_escape(&branding.logo_alt),
        name = html_escape(&model.newsletter_name),
        title = html_escape(&model.issue_title),
        edition = html_escape(&model.edition),
    )
}

fn heading(text: &str, color: &str) -> String {
    format!(
        r#"<div style="font-size:11px;font-weight:600;letter-spacing:0.16em;text-transform:uppercase;color:{color};margin-bottom:4px;">{text}</div>"#,
        color = color,
        text = html_escape(text),
    )
}

fn rich_text_block(sanitized: &str) -> String {
    format!(
        r#"<div style="{style}">
{body}
</div>"#,
        style = BODY_TEXT_STYLE,
        body = sanitized.trim(),
    )
}

/// `<img>` for a non-empty image value, empty string otherwise.
fn image_tag(src: &str, field: ImageField, extra_style: &str) -> String {
    match usable_image_src(src) {
        Some(src) => format!(
            r#"<img src="{src}" alt="{alt}" style="{base}{extra}" />"#,
            src = html_escape(src),
            alt = html_escape(field.alt_text()),
            base = IMAGE_BASE_STYLE,
            extra = extra_style,
        ),
        None => String::new(),
    }
}

fn leadership_section(model: &ContentModel, branding: &Branding) -> String {
    let image_cell = match image_tag(
        &model.leadership_image,
        ImageField::Leadership,
        "width:140px;height:140px;object-fit:cover;",
    ) {
        img if img.is_empty() => String::new(),
        img => format!(
            r#"
                              <td style="width:140px;padding-left:12px;vertical-align:top;">{img}</td>"#
        ),
    };

    let signoff = branding
        .signoff_lines
        .iter()
        .map(|line| html_escape(line))
        .collect::<Vec<_>>()
        .join("<br/>\n");

    format!(
        r#"                    <table role="presentation" width="100%" style="margin-bottom:24px;border-radius:12px;background:#eff6ff;border:1px solid #dbeafe;">
                      <tr>
                        <td style="padding:16px;">
                          <table role="presentation" width="100%">
                            <tr>
                              <td style="vertical-align:top;">
                                {heading}
                                <div style="font-size:16px;font-weight:600;margin-bottom:6px;">{title}</div>
                                {body}
                                <div style="margin-top:12px;font-size:13px;color:#374151;">
{signoff}
                                </div>
                              </td>{image_cell}
                            </tr>
                          </table>
                        </td>
                      </tr>
                    </table>"#,
        heading = heading(&branding.headings.leadership, "#1d4ed8"),
        title = html_escape(&model.leadership_title),
        body = rich_text_block(&sanitize(&model.leadership_body_html)),
        signoff = signoff,
        image_cell = image_cell,
    )
}

/// Card used in the two-column rows.
fn half_card(title: &str, color: &str, box_style: &str, sanitized: &str, extra: &str) -> String {
    format!(
        r#"<table role="presentation" width="100%" style="border-radius:12px;{box_style}">
                            <tr>
                              <td style="padding:12px 14px;">
                                {heading}
                                {body}{extra}
                              </td>
                            </tr>
                          </table>"#,
        box_style = box_style,
        heading = heading(title, color),
        body = rich_text_block(sanitized),
        extra = extra,
    )
}

fn two_column(left: String, right: String) -> String {
    format!(
        r#"                    <table role="presentation" width="100%" style="margin-bottom:24px;" cellpadding="0" cellspacing="0">
                      <tr>
                        <td width="50%" style="padding-right:8px;vertical-align:top;">
                          {left}
                        </td>
                        <td width="50%" style="padding-left:8px;vertical-align:top;">
                          {right}
                        </td>
                      </tr>
                    </table>"#
    )
}

fn announcements_and_compliance(model: &ContentModel, branding: &Branding) -> String {
    let compliance_image = match image_tag(
        &model.compliance_image,
        ImageField::Compliance,
        "width:100%;height:90px;object-fit:cover;",
    ) {
        img if img.is_empty() => String::new(),
        img => format!("\n<div style=\"margin-top:8px;\">{img}</div>"),
    };

    two_column(
        half_card(
            &branding.headings.announcements,
            "#6b21a8",
            "border:1px solid #e5e7eb;background:#ffffff;",
            &sanitize(&model.important_announcements_html),
            "",
        ),
        half_card(
            &branding.headings.compliance,
            "#b91c1c",
            "border:1px solid #fecaca;background:#fef2f2;",
            &sanitize(&model.compliance_reminders_html),
            &compliance_image,
        ),
    )
}

fn boxed_section(title: &str, color: &str, box_style: &str, raw_html: &str) -> String {
    format!(
        r#"                    <table role="presentation" width="100%" style="margin-bottom:24px;border-radius:12px;{box_style}">
                      <tr>
                        <td style="padding:16px;">
                          {heading}
                          {body}
                        </td>
                      </tr>
                    </table>"#,
        box_style = box_style,
        heading = heading(title, color),
        body = rich_text_block(&sanitize(raw_html)),
    )
}

fn section_with_image_column(
    title: &str,
    raw_html: &str,
    images: [(&str, ImageField); 2],
) -> String {
    let [(first_src, first_field), (second_src, second_field)] = images;
    let first = image_tag(
        first_src,
        first_field,
        "width:100%;height:80px;object-fit:cover;margin-bottom:8px;",
    );
    let second = image_tag(second_src, second_field, "width:100%;height:80px;object-fit:cover;");

    format!(
        r#"                    <table role="presentation" width="100%" style="margin-bottom:24px;border-radius:12px;border:1px solid #e5e7eb;background:#ffffff;">
                      <tr>
                        <td style="padding:16px;">
                          {heading}
                          <table role="presentation" width="100%">
                            <tr>
                              <td style="vertical-align:top;">
                                {body}
                              </td>
                              <td style="width:160px;padding-left:12px;vertical-align:top;">{first}{second}</td>
                            </tr>
                          </table>
                        </td>
                      </tr>
                    </table>"#,
        heading = heading(title, "#4b5563"),
        body = rich_text_block(&sanitize(raw_html)),
        first = first,
        second = second,
    )
}

/// One row per non-blank link; nothing at all when every slot is blank.
fn quick_link_rows(links: &[QuickLink]) -> String {
    links
        .iter()
        .filter(|link| !link.is_blank())
        .map(|link| {
            format!(
                r#"
                            <tr>
                              <td style="padding:4px 0;">
                                <a href="{href}" style="color:#2563eb;text-decoration:none;">{label}</a>
                              </td>
                            </tr>"#,
                href = html_escape(usable_link_href(&link.url)),
                label = html_escape(link.display_label()),
            )
        })
        .collect()
}

fn quick_links_section(links: &[QuickLink], branding: &Branding) -> String {
    format!(
        r#"                    <table role="presentation" width="100%" style="margin-bottom:8px;border-radius:12px;border:1px solid #bfdbfe;background:#eff6ff;">
                      <tr>
                        <td style="padding:12px 14px;font-size:13px;">
                          {heading}
                          <table role="presentation" width="100%">{rows}
                          </table>
                        </td>
                      </tr>
                    </table>"#,
        heading = heading(&branding.headings.quick_links, "#1d4ed8"),
        rows = quick_link_rows(links),
    )
}

fn footer(branding: &Branding) -> String {
    let lines = branding
        .footer_lines
        .iter()
        .map(|line| html_escape(line))
        .collect::<Vec<_>>()
        .join("<br/>\n");
    format!(
        r#"                    <table role="presentation" width="100%" style="margin-top:16px;">
                      <tr>
                        <td style="text-align:center;font-size:11px;color:#9ca3af;padding-top:4px;border-top:1px solid #e5e7eb;">
{lines}
                        </td>
                      </tr>
                    </table>"#
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BackgroundMode;

    const LINK_ROW_MARKER: &str = r#"<td style="padding:4px 0;">"#;

    fn model_without_images() -> ContentModel {
        ContentModel {
            newsletter_name: "Port Pulse".into(),
            edition: "December 2025".into(),
            issue_title: "Storm Safety".into(),
            leadership_body_html: "<p>Stay safe.</p>".into(),
            ..ContentModel::default()
        }
    }

    #[test]
    fn test_document_structure() {
        let html = render_email_html(&model_without_images());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<title>Port Pulse - December 2025</title>"));
        assert_eq!(html.matches("<body").count(), 1);
        assert!(!html.contains("<style"));
        assert!(!html.contains("class="));
    }

    #[test]
    fn test_output_is_deterministic() {
        let model = ContentModel::sample();
        assert_eq!(render_email_html(&model), render_email_html(&model));
    }

    #[test]
    fn test_rich_text_is_sanitized() {
        let model = ContentModel {
            csr_html: r#"<p onclick="steal()">Relief</p><script>alert(1)</script>"#.into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);

        assert!(html.contains("<p>Relief</p>"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_plain_text_fields_are_escaped() {
        let model = ContentModel {
            newsletter_name: r#""><script>alert(1)</script>"#.into(),
            leadership_title: "<b>Bold?</b>".into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);

        assert!(!html.contains("<script>"));
        assert!(html.contains("<title>&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt; - December 2025</title>"));
        assert!(html.contains("&lt;b&gt;Bold?&lt;/b&gt;"));
    }

    #[test]
    fn test_blank_logo_uses_placeholder() {
        let model = ContentModel {
            logo_url: "   ".into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);
        assert!(html.contains(crate::config::Settings::DEFAULT_PLACEHOLDER_LOGO_URL));
    }

    #[test]
    fn test_logo_url_used_when_present() {
        let model = ContentModel {
            logo_url: "https://cdn.example.com/logo.png".into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);
        assert!(html.contains(r#"<img src="https://cdn.example.com/logo.png""#));
        assert!(!html.contains("via.placeholder.com"));
    }

    #[test]
    fn test_script_scheme_logo_falls_back_to_placeholder() {
        let model = ContentModel {
            logo_url: "javascript:alert(1)".into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);
        assert!(!html.contains("javascript:"));
        assert!(html.contains("via.placeholder.com"));
    }

    #[test]
    fn test_empty_images_render_no_markup() {
        let html = render_email_html(&model_without_images());
        // Only the header logo remains.
        assert_eq!(html.matches("<img").count(), 1);
        assert!(!html.contains("alt=\"CEO\""));
        assert!(!html.contains("width:140px;padding-left:12px"));
    }

    #[test]
    fn test_present_images_render() {
        let model = ContentModel {
            leadership_image: "data:image/jpeg;base64,AAAA".into(),
            csr_image2: "data:image/jpeg;base64,BBBB".into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);
        assert_eq!(html.matches("<img").count(), 3);
        assert!(html.contains(r#"<img src="data:image/jpeg;base64,AAAA" alt="CEO""#));
        assert!(html.contains(r#"alt="CSR 2""#));
    }

    #[test]
    fn test_no_background_layer_without_image() {
        let html = render_email_html(&model_without_images());
        assert!(!html.contains("background-image"));
        assert!(!html.contains("opacity:0.15"));
    }

    #[test]
    fn test_background_mode_mapping() {
        let with_mode = |mode| ContentModel {
            background_image: "data:image/jpeg;base64,AAAA".into(),
            background_mode: mode,
            ..model_without_images()
        };

        let html = render_email_html(&with_mode(BackgroundMode::Repeat));
        assert!(html.contains("background-repeat:repeat;background-size:auto;"));

        let html = render_email_html(&with_mode(BackgroundMode::Cover));
        assert!(html.contains("background-repeat:no-repeat;background-size:cover;"));

        let html = render_email_html(&with_mode(BackgroundMode::Contain));
        assert!(html.contains("background-repeat:no-repeat;background-size:contain;"));

        let html = render_email_html(&with_mode(BackgroundMode::Auto));
        assert!(html.contains("background-repeat:no-repeat;background-size:auto;"));
    }

    #[test]
    fn test_background_opacity() {
        let mut model = ContentModel {
            background_image: "data:image/jpeg;base64,AAAA".into(),
            ..model_without_images()
        };
        let html = render_email_html(&model);
        assert!(html.contains("opacity:0.15;"));

        model.background_opacity = 0.4;
        assert!(render_email_html(&model).contains("opacity:0.4;"));

        model.background_opacity = 5.0;
        assert!(render_email_html(&model).contains("opacity:0.6;"));
    }

    #[test]
    fn test_quick_links_filtering() {
        let model = ContentModel {
            quick_links: [
                QuickLink::default(),
                QuickLink::new("CALM", "https://calm.example.com"),
                QuickLink::default(),
            ],
            ..model_without_images()
        };
        let html = render_email_html(&model);

        assert_eq!(html.matches(LINK_ROW_MARKER).count(), 1);
        assert!(html.contains(
            r#"<a href="https://calm.example.com" style="color:#2563eb;text-decoration:none;">CALM</a>"#
        ));
    }

    #[test]
    fn test_quick_links_defaults() {
        let model = ContentModel {
            quick_links: [
                QuickLink::new("HR Desk", ""),
                QuickLink::new("", "https://intranet.example.com"),
                QuickLink::new("Bad", "javascript:alert(1)"),
            ],
            ..model_without_images()
        };
        let html = render_email_html(&model);

        assert_eq!(html.matches(LINK_ROW_MARKER).count(), 3);
        assert!(html.contains(r##"<a href="#" style="color:#2563eb;text-decoration:none;">HR Desk</a>"##));
        assert!(html.contains(r#"<a href="https://intranet.example.com" style="color:#2563eb;text-decoration:none;">Link</a>"#));
        assert!(html.contains(r##"<a href="#" style="color:#2563eb;text-decoration:none;">Bad</a>"##));
    }

    #[test]
    fn test_whitespace_only_label_still_renders() {
        let model = ContentModel {
            quick_links: [
                QuickLink::new(" ", ""),
                QuickLink::default(),
                QuickLink::default(),
            ],
            ..model_without_images()
        };
        let html = render_email_html(&model);

        assert_eq!(html.matches(LINK_ROW_MARKER).count(), 1);
        assert!(html.contains(r##"<a href="#" style="color:#2563eb;text-decoration:none;"> </a>"##));
    }

    #[test]
    fn test_all_blank_quick_links_render_empty_table() {
        let html = render_email_html(&model_without_images());
        assert_eq!(html.matches(LINK_ROW_MARKER).count(), 0);
        assert!(html.contains("Quick Links"));
    }

    #[test]
    fn test_output_is_trimmed() {
        let html = render_email_html(&ContentModel::default());
        assert_eq!(html, html.trim());
    }

    #[test]
    fn test_custom_branding() {
        let mut branding = Branding::default();
        branding.footer_lines = vec!["Internal & confidential".into()];
        branding.headings.quick_links = "Links".into();
        let html = render_email_html_with(&model_without_images(), &branding);

        assert!(html.contains("Internal &amp; confidential"));
        assert!(html.contains(">Links</div>"));
    }
}
