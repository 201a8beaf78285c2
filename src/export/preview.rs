//! On-screen Preview Rendering
//!
//! The preview is a regular HTML page with a stylesheet, meant for a webview
//! or browser pane next to the editor form. It is not email-safe; use
//! [`super::email`] for anything that leaves the machine.
//!
//! Rich text is still sanitized here, so the preview never runs markup that
//! the export would strip.

use super::escape::{css_url_escape, html_escape, usable_image_src, usable_link_href};
use crate::config::Settings;
use crate::model::{ContentModel, ImageField, RichTextField};
use crate::sanitize::sanitize;

/// Render the preview page for the current model.
pub fn render_preview_html(model: &ContentModel, settings: &Settings) -> String {
    let branding = &settings.branding;
    let headings = &branding.headings;

    let logo_src = usable_image_src(&model.logo_url)
        .unwrap_or(branding.placeholder_logo_url.as_str());

    let issue_title = match model.issue_title.trim() {
        "" => settings.default_issue_title.as_str(),
        title => title,
    };

    let mut sections = String::new();
    sections.push_str(&leadership(model, settings));
    sections.push_str(&format!(
        "<section class=\"grid\">\n{}\n{}\n</section>\n",
        card(
            "announcements",
            &headings.announcements,
            model,
            RichTextField::ImportantAnnouncements,
            &[]
        ),
        card(
            "compliance",
            &headings.compliance,
            model,
            RichTextField::ComplianceReminders,
            &[ImageField::Compliance]
        ),
    ));
    sections.push_str(&card(
        "safety",
        &headings.safety,
        model,
        RichTextField::SafetyReminders,
        &[],
    ));
    sections.push_str(&card(
        "special",
        &headings.special_message,
        model,
        RichTextField::SpecialMessage,
        &[],
    ));
    sections.push_str(&card(
        "csr",
        &headings.csr,
        model,
        RichTextField::Csr,
        &[ImageField::Csr1, ImageField::Csr2],
    ));
    sections.push_str(&card(
        "events",
        &headings.events,
        model,
        RichTextField::EmployeeEvents,
        &[ImageField::Events1, ImageField::Events2],
    ));
    sections.push_str(&format!(
        "<section class=\"grid\">\n{}\n{}\n</section>\n",
        card("wins", &headings.wins, model, RichTextField::WinsAndShoutouts, &[]),
        card("useful", &headings.useful_info, model, RichTextField::UsefulInfo, &[]),
    ));
    sections.push_str(&quick_links(model, settings));

    let html = format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name} - {edition}</title>
    <style>
{css}
    </style>
</head>
<body>
<div class="preview">
{background}<article class="sheet">
<header class="masthead">
    <div class="brand">
        <img class="logo" src="{logo}" alt="{logo_alt}">
        <div>
            <div class="name">{name}</div>
            <div class="issue-title">{issue_title}</div>
        </div>
    </div>
    <div class="edition"><div class="label">Edition</div><div>{edition}</div></div>
</header>
<div class="content">
{sections}</div>
</article>
</div>
</body>
</html>
"#,
        name = html_escape(&model.newsletter_name),
        edition = html_escape(&model.edition),
        css = PREVIEW_CSS,
        background = background(model),
        logo = html_escape(logo_src),
        logo_alt = html_escape(&branding.logo_alt),
        issue_title = html_escape(issue_title),
        sections = sections,
    );

    html.trim().to_string()
}

fn background(model: &ContentModel) -> String {
    match usable_image_src(&model.background_image) {
        Some(src) => format!(
            "<div class=\"backdrop\" style=\"background-image:url('{url}');background-repeat:{repeat};background-size:{size};opacity:{opacity};\"></div>\n",
            url = html_escape(&css_url_escape(src)),
            repeat = model.background_mode.css_repeat(),
            size = model.background_mode.css_size(),
            opacity = model.effective_background_opacity(),
        ),
        None => String::new(),
    }
}

fn images(model: &ContentModel, fields: &[ImageField]) -> String {
    fields
        .iter()
        .filter_map(|&field| {
            usable_image_src(model.image(field)).map(|src| {
                format!(
                    "<img class=\"photo\" src=\"{}\" alt=\"{}\">\n",
                    html_escape(src),
                    html_escape(field.alt_text())
                )
            })
        })
        .collect()
}

fn card(
    class: &str,
    title: &str,
    model: &ContentModel,
    field: RichTextField,
    image_fields: &[ImageField],
) -> String {
    format!(
        "<section class=\"card {class}\">\n<div class=\"heading\">{title}</div>\n<div class=\"prose\">{body}</div>\n{images}</section>\n",
        class = class,
        title = html_escape(title),
        body = sanitize(model.rich_text(field)).trim(),
        images = images(model, image_fields),
    )
}

fn leadership(model: &ContentModel, settings: &Settings) -> String {
    let signoff = settings
        .branding
        .signoff_lines
        .iter()
        .map(|line| html_escape(line))
        .collect::<Vec<_>>()
        .join("<br>");

    format!(
        "<section class=\"card leadership\">\n<div class=\"leadership-text\">\n<div class=\"heading\">{heading}</div>\n<h2>{title}</h2>\n<div class=\"prose\">{body}</div>\n<div class=\"signoff\">{signoff}</div>\n</div>\n{image}</section>\n",
        heading = html_escape(&settings.branding.headings.leadership),
        title = html_escape(&model.leadership_title),
        body = sanitize(&model.leadership_body_html).trim(),
        signoff = signoff,
        image = images(model, &[ImageField::Leadership]),
    )
}

fn quick_links(model: &ContentModel, settings: &Settings) -> String {
    let items: String = model
        .quick_links
        .iter()
        .filter(|link| !link.is_blank())
        .map(|link| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                html_escape(usable_link_href(&link.url)),
                html_escape(link.display_label())
            )
        })
        .collect();

    format!(
        "<section class=\"card links\">\n<div class=\"heading\">{}</div>\n<ul>\n{}</ul>\n</section>\n",
        html_escape(&settings.branding.headings.quick_links),
        items
    )
}

/// Stylesheet for the preview page.
const PREVIEW_CSS: &str = r#"
body {
    margin: 0;
    padding: 24px;
    background: #f1f5f9;
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    font-size: 14px;
    color: #1e293b;
}

.preview { position: relative; max-width: 768px; margin: 0 auto; }

.backdrop {
    position: absolute;
    inset: 0;
    border-radius: 16px;
    background-position: center;
    pointer-events: none;
}

.sheet {
    position: relative;
    background: rgba(255, 255, 255, 0.9);
    border: 1px solid #e2e8f0;
    border-radius: 16px;
    overflow: hidden;
}

.masthead {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 16px;
    padding: 16px 24px;
    background: linear-gradient(90deg, #0f172a, #4f46e5);
    color: #f8fafc;
}

.brand { display: flex; align-items: center; gap: 16px; }
.logo { height: 40px; width: auto; border-radius: 4px; object-fit: contain; }
.name { font-size: 10px; letter-spacing: 0.2em; text-transform: uppercase; opacity: 0.8; }
.issue-title { font-size: 16px; font-weight: 600; }
.edition { text-align: right; font-size: 11px; opacity: 0.8; }
.edition .label { font-weight: 500; }

.content { padding: 20px; display: flex; flex-direction: column; gap: 24px; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }

.card { border: 1px solid #e2e8f0; border-radius: 12px; padding: 16px; background: #ffffff; }
.card .heading {
    font-size: 11px;
    font-weight: 600;
    letter-spacing: 0.18em;
    text-transform: uppercase;
    margin-bottom: 4px;
    color: #475569;
}

.leadership { display: flex; gap: 16px; background: #eef2ff; border-color: #e0e7ff; }
.leadership .heading { color: #4338ca; }
.leadership-text { flex: 1; }
.leadership h2 { font-size: 16px; margin: 0 0 8px 0; }
.signoff { margin-top: 12px; font-size: 12px; color: #475569; }

.announcements .heading { color: #7e22ce; }
.compliance { background: #fef2f2; border-color: #fee2e2; }
.compliance .heading { color: #b91c1c; }
.safety { background: #ecfdf5; border-color: #a7f3d0; }
.safety .heading { color: #047857; }
.special { background: #fffbeb; border-color: #fde68a; }
.special .heading { color: #b45309; }
.links { background: #eff6ff; border-color: #bfdbfe; }
.links .heading { color: #1d4ed8; }
.links a { color: #2563eb; text-decoration: none; }

.photo { display: block; width: 100%; max-width: 160px; height: auto; border-radius: 12px; margin-top: 8px; object-fit: cover; }
.prose p { margin: 0 0 8px 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuickLink;

    #[test]
    fn test_preview_uses_default_issue_title() {
        let settings = Settings::default();
        let html = render_preview_html(&ContentModel::default(), &settings);
        assert!(html.contains(&html_escape(&settings.default_issue_title)));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn test_preview_sanitizes_rich_text() {
        let model = ContentModel {
            special_message_html: "<p>Joy</p><img src=x onerror=alert(1)>".into(),
            ..ContentModel::default()
        };
        let html = render_preview_html(&model, &Settings::default());
        assert!(html.contains("<p>Joy</p>"));
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn test_preview_omits_empty_images_and_background() {
        let html = render_preview_html(&ContentModel::default(), &Settings::default());
        assert!(!html.contains("class=\"photo\""));
        assert!(!html.contains("class=\"backdrop\""));
    }

    #[test]
    fn test_preview_renders_images_and_links() {
        let mut model = ContentModel {
            events_image1: "data:image/jpeg;base64,AAAA".into(),
            background_image: "data:image/jpeg;base64,BBBB".into(),
            ..ContentModel::default()
        };
        model.quick_links[2] = QuickLink::new("SOP", "https://intranet.example.com/sop");
        let html = render_preview_html(&model, &Settings::default());

        assert_eq!(html.matches("class=\"photo\"").count(), 1);
        assert!(html.contains("class=\"backdrop\""));
        assert!(html.contains("<li><a href=\"https://intranet.example.com/sop\">SOP</a></li>"));
    }
}
