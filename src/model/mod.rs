//! Newsletter content model
//!
//! `ContentModel` is the single source of truth for one issue: the preview
//! and the email export both render from it, and saved issues are snapshots
//! of it. Field names serialize in camelCase so stored collections keep the
//! same JSON shape as the browser tool they were written by.

mod fields;
mod sample;

pub use fields::{ImageField, RichTextField, TextField};

use serde::{Deserialize, Deserializer, Serialize};

/// Background layer opacity used when nothing else is set.
pub const DEFAULT_BACKGROUND_OPACITY: f64 = 0.15;

/// Highest background opacity the editor allows.
pub const MAX_BACKGROUND_OPACITY: f64 = 0.6;

/// Number of quick link slots in every issue.
pub const QUICK_LINK_SLOTS: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Background Mode
// ─────────────────────────────────────────────────────────────────────────────

/// How the background image fills the newsletter body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundMode {
    /// Scale to cover the whole area
    #[default]
    Cover,
    /// Scale to fit inside the area
    Contain,
    /// Tile at natural size
    Repeat,
    /// Natural size, no tiling
    Auto,
}

impl BackgroundMode {
    /// Name used in stored JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundMode::Cover => "cover",
            BackgroundMode::Contain => "contain",
            BackgroundMode::Repeat => "repeat",
            BackgroundMode::Auto => "auto",
        }
    }

    /// CSS `background-repeat` value for this mode.
    pub fn css_repeat(&self) -> &'static str {
        match self {
            BackgroundMode::Repeat => "repeat",
            _ => "no-repeat",
        }
    }

    /// CSS `background-size` value for this mode.
    pub fn css_size(&self) -> &'static str {
        match self {
            BackgroundMode::Cover => "cover",
            BackgroundMode::Contain => "contain",
            BackgroundMode::Repeat | BackgroundMode::Auto => "auto",
        }
    }

    /// Get all background modes.
    pub fn all() -> &'static [BackgroundMode] {
        &[
            BackgroundMode::Cover,
            BackgroundMode::Contain,
            BackgroundMode::Repeat,
            BackgroundMode::Auto,
        ]
    }
}

impl From<String> for BackgroundMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cover" => BackgroundMode::Cover,
            "contain" => BackgroundMode::Contain,
            "repeat" => BackgroundMode::Repeat,
            _ => BackgroundMode::Auto,
        }
    }
}

impl From<BackgroundMode> for String {
    fn from(mode: BackgroundMode) -> Self {
        mode.as_str().to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quick Links
// ─────────────────────────────────────────────────────────────────────────────

/// One quick link slot. Both parts may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickLink {
    pub label: String,
    pub url: String,
}

impl QuickLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// True when both the label and the URL are empty strings.
    ///
    /// Whitespace counts as content, so a slot holding only spaces still
    /// renders.
    pub fn is_blank(&self) -> bool {
        self.label.is_empty() && self.url.is_empty()
    }

    /// Link text as rendered: the label verbatim, or `Link` when empty.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "Link"
        } else {
            &self.label
        }
    }
}

/// Pad or truncate any stored sequence to exactly the three slots.
fn deserialize_quick_links<'de, D>(
    deserializer: D,
) -> Result<[QuickLink; QUICK_LINK_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let stored: Vec<QuickLink> = Vec::deserialize(deserializer)?;
    let mut slots: [QuickLink; QUICK_LINK_SLOTS] = Default::default();
    for (slot, link) in slots.iter_mut().zip(stored) {
        *slot = link;
    }
    Ok(slots)
}

// ─────────────────────────────────────────────────────────────────────────────
// Content Model
// ─────────────────────────────────────────────────────────────────────────────

/// All editable content of one newsletter issue.
///
/// Every field has a default, so a partially stored issue still loads and the
/// renderers never see a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentModel {
    // Plain text
    pub newsletter_name: String,
    pub edition: String,
    pub issue_title: String,
    /// Name the issue is saved under
    pub issue_name: String,
    pub logo_url: String,
    pub leadership_title: String,

    // Rich text (untrusted HTML fragments)
    pub leadership_body_html: String,
    pub important_announcements_html: String,
    pub compliance_reminders_html: String,
    pub safety_reminders_html: String,
    pub special_message_html: String,
    pub useful_info_html: String,
    pub wins_and_shoutouts_html: String,
    pub csr_html: String,
    pub employee_events_html: String,

    // Images (empty or a data URL)
    pub background_image: String,
    pub leadership_image: String,
    pub compliance_image: String,
    pub csr_image1: String,
    pub csr_image2: String,
    pub events_image1: String,
    pub events_image2: String,

    // Background display
    pub background_mode: BackgroundMode,
    pub background_opacity: f64,

    #[serde(deserialize_with = "deserialize_quick_links")]
    pub quick_links: [QuickLink; QUICK_LINK_SLOTS],
}

impl Default for ContentModel {
    fn default() -> Self {
        Self {
            newsletter_name: String::new(),
            edition: String::new(),
            issue_title: String::new(),
            issue_name: String::new(),
            logo_url: String::new(),
            leadership_title: String::new(),
            leadership_body_html: String::new(),
            important_announcements_html: String::new(),
            compliance_reminders_html: String::new(),
            safety_reminders_html: String::new(),
            special_message_html: String::new(),
            useful_info_html: String::new(),
            wins_and_shoutouts_html: String::new(),
            csr_html: String::new(),
            employee_events_html: String::new(),
            background_image: String::new(),
            leadership_image: String::new(),
            compliance_image: String::new(),
            csr_image1: String::new(),
            csr_image2: String::new(),
            events_image1: String::new(),
            events_image2: String::new(),
            background_mode: BackgroundMode::default(),
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
            quick_links: Default::default(),
        }
    }
}

impl ContentModel {
    /// The sample issue the editor starts with.
    pub fn sample() -> Self {
        sample::sample_content()
    }

    /// Background opacity clamped to the editor's range.
    pub fn effective_background_opacity(&self) -> f64 {
        clamp_opacity(self.background_opacity)
    }

    /// Bring out-of-range values back into their documented domain.
    pub fn sanitize(&mut self) {
        self.background_opacity = clamp_opacity(self.background_opacity);
    }

    /// Parse a model from JSON and sanitize it.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut model: Self = serde_json::from_str(json)?;
        model.sanitize();
        Ok(model)
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::NewsletterName => &self.newsletter_name,
            TextField::Edition => &self.edition,
            TextField::IssueTitle => &self.issue_title,
            TextField::IssueName => &self.issue_name,
            TextField::LogoUrl => &self.logo_url,
            TextField::LeadershipTitle => &self.leadership_title,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        let slot = match field {
            TextField::NewsletterName => &mut self.newsletter_name,
            TextField::Edition => &mut self.edition,
            TextField::IssueTitle => &mut self.issue_title,
            TextField::IssueName => &mut self.issue_name,
            TextField::LogoUrl => &mut self.logo_url,
            TextField::LeadershipTitle => &mut self.leadership_title,
        };
        *slot = value;
    }

    pub fn rich_text(&self, field: RichTextField) -> &str {
        match field {
            RichTextField::LeadershipBody => &self.leadership_body_html,
            RichTextField::ImportantAnnouncements => &self.important_announcements_html,
            RichTextField::ComplianceReminders => &self.compliance_reminders_html,
            RichTextField::SafetyReminders => &self.safety_reminders_html,
            RichTextField::SpecialMessage => &self.special_message_html,
            RichTextField::UsefulInfo => &self.useful_info_html,
            RichTextField::WinsAndShoutouts => &self.wins_and_shoutouts_html,
            RichTextField::Csr => &self.csr_html,
            RichTextField::EmployeeEvents => &self.employee_events_html,
        }
    }

    pub fn set_rich_text(&mut self, field: RichTextField, value: String) {
        let slot = match field {
            RichTextField::LeadershipBody => &mut self.leadership_body_html,
            RichTextField::ImportantAnnouncements => &mut self.important_announcements_html,
            RichTextField::ComplianceReminders => &mut self.compliance_reminders_html,
            RichTextField::SafetyReminders => &mut self.safety_reminders_html,
            RichTextField::SpecialMessage => &mut self.special_message_html,
            RichTextField::UsefulInfo => &mut self.useful_info_html,
            RichTextField::WinsAndShoutouts => &mut self.wins_and_shoutouts_html,
            RichTextField::Csr => &mut self.csr_html,
            RichTextField::EmployeeEvents => &mut self.employee_events_html,
        };
        *slot = value;
    }

    pub fn image(&self, field: ImageField) -> &str {
        match field {
            ImageField::Background => &self.background_image,
            ImageField::Leadership => &self.leadership_image,
            ImageField::Compliance => &self.compliance_image,
            ImageField::Csr1 => &self.csr_image1,
            ImageField::Csr2 => &self.csr_image2,
            ImageField::Events1 => &self.events_image1,
            ImageField::Events2 => &self.events_image2,
        }
    }

    pub fn set_image(&mut self, field: ImageField, value: String) {
        let slot = match field {
            ImageField::Background => &mut self.background_image,
            ImageField::Leadership => &mut self.leadership_image,
            ImageField::Compliance => &mut self.compliance_image,
            ImageField::Csr1 => &mut self.csr_image1,
            ImageField::Csr2 => &mut self.csr_image2,
            ImageField::Events1 => &mut self.events_image1,
            ImageField::Events2 => &mut self.events_image2,
        };
        *slot = value;
    }
}

fn clamp_opacity(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_BACKGROUND_OPACITY)
    } else {
        DEFAULT_BACKGROUND_OPACITY
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Saved Issue
// ─────────────────────────────────────────────────────────────────────────────

/// A named snapshot of a content model, as persisted in the issue store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedIssue {
    /// Unique id derived from the creation time (epoch milliseconds)
    pub id: String,
    pub name: String,
    /// Owned copy, never shared with the live model
    pub data: ContentModel,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
