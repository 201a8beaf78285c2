//! User settings for the newsletter builder
//!
//! This module defines the `Settings` struct: the storage slot name, the
//! branding text wrapped around every exported issue, and crop output
//! options. All of it serializes to JSON for persistence.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Branding
// ─────────────────────────────────────────────────────────────────────────────

/// Section headings shown above each content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionHeadings {
    pub leadership: String,
    pub announcements: String,
    pub compliance: String,
    pub safety: String,
    pub special_message: String,
    pub csr: String,
    pub events: String,
    pub wins: String,
    pub useful_info: String,
    pub quick_links: String,
}

impl Default for SectionHeadings {
    fn default() -> Self {
        Self {
            leadership: "Message from Leadership".into(),
            announcements: "Important Announcements".into(),
            compliance: "Compliance Reminders".into(),
            safety: "Safety Reminders · Storms & Floods".into(),
            special_message: "Special Message · Xmas Season".into(),
            csr: "Our CSR Activities".into(),
            events: "Employee Events".into(),
            wins: "Wins & Shout-outs".into(),
            useful_info: "Useful Information".into(),
            quick_links: "Quick Links".into(),
        }
    }
}

/// Fixed text and fallbacks that surround the issue content.
///
/// Every string here is plain text and is escaped when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Alt text of the header logo
    pub logo_alt: String,
    /// Logo used when the issue has no logo URL
    pub placeholder_logo_url: String,
    /// Lines under the leadership message
    pub signoff_lines: Vec<String>,
    /// Lines in the footer
    pub footer_lines: Vec<String>,
    pub headings: SectionHeadings,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            logo_alt: "Port City BPO".into(),
            placeholder_logo_url: Settings::DEFAULT_PLACEHOLDER_LOGO_URL.into(),
            signoff_lines: vec![
                "Warm regards,".into(),
                "Gary Seaton".into(),
                "CEO, Port City BPO (Pvt) Ltd.".into(),
            ],
            footer_lines: vec![
                "You're receiving Port Pulse as a member of Port City BPO.".into(),
                "Please keep this information internal and confidential.".into(),
            ],
            headings: SectionHeadings::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Crop Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Output options for cropped images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: Settings::DEFAULT_JPEG_QUALITY,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Library settings, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the storage slot holding saved issues
    pub storage_key: String,

    /// Issue title shown in the preview when the issue has none
    pub default_issue_title: String,

    pub branding: Branding,

    pub crop: CropSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.into(),
            default_issue_title: "Storm Safety & Xmas Edition".into(),
            branding: Branding::default(),
            crop: CropSettings::default(),
        }
    }
}

impl Settings {
    pub const DEFAULT_STORAGE_KEY: &'static str = "portPulseIssues_v2";
    pub const DEFAULT_PLACEHOLDER_LOGO_URL: &'static str =
        "https://via.placeholder.com/180x60?text=Port+City+BPO+Logo";
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;
    pub const MIN_JPEG_QUALITY: u8 = 1;
    pub const MAX_JPEG_QUALITY: u8 = 100;

    /// Fix values that would break storage or rendering.
    pub fn sanitize(&mut self) {
        self.crop.jpeg_quality = self
            .crop
            .jpeg_quality
            .clamp(Self::MIN_JPEG_QUALITY, Self::MAX_JPEG_QUALITY);

        if self.storage_key.trim().is_empty() {
            self.storage_key = Self::DEFAULT_STORAGE_KEY.into();
        }

        if self.branding.placeholder_logo_url.trim().is_empty() {
            self.branding.placeholder_logo_url = Self::DEFAULT_PLACEHOLDER_LOGO_URL.into();
        }
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
