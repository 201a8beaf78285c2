//! Field identifiers for whole-field replacement on the content model.

/// Plain-text fields. Never HTML; escaped wherever they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    NewsletterName,
    Edition,
    IssueTitle,
    IssueName,
    LogoUrl,
    LeadershipTitle,
}

impl TextField {
    pub fn label(&self) -> &'static str {
        match self {
            TextField::NewsletterName => "Newsletter Name",
            TextField::Edition => "Edition",
            TextField::IssueTitle => "Issue Title",
            TextField::IssueName => "Issue Name (for saving)",
            TextField::LogoUrl => "Logo URL",
            TextField::LeadershipTitle => "Leadership Title",
        }
    }

    pub fn all() -> &'static [TextField] {
        &[
            TextField::NewsletterName,
            TextField::Edition,
            TextField::IssueTitle,
            TextField::IssueName,
            TextField::LogoUrl,
            TextField::LeadershipTitle,
        ]
    }
}

/// Rich-text fields holding editor-produced HTML fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RichTextField {
    LeadershipBody,
    ImportantAnnouncements,
    ComplianceReminders,
    SafetyReminders,
    SpecialMessage,
    UsefulInfo,
    WinsAndShoutouts,
    Csr,
    EmployeeEvents,
}

impl RichTextField {
    pub fn label(&self) -> &'static str {
        match self {
            RichTextField::LeadershipBody => "Leadership Message",
            RichTextField::ImportantAnnouncements => "Important Announcements",
            RichTextField::ComplianceReminders => "Compliance Reminders",
            RichTextField::SafetyReminders => "Safety Reminders",
            RichTextField::SpecialMessage => "Special Message",
            RichTextField::UsefulInfo => "Useful Information",
            RichTextField::WinsAndShoutouts => "Wins & Shout-outs",
            RichTextField::Csr => "CSR Activities",
            RichTextField::EmployeeEvents => "Employee Events",
        }
    }

    pub fn all() -> &'static [RichTextField] {
        &[
            RichTextField::LeadershipBody,
            RichTextField::ImportantAnnouncements,
            RichTextField::ComplianceReminders,
            RichTextField::SafetyReminders,
            RichTextField::SpecialMessage,
            RichTextField::UsefulInfo,
            RichTextField::WinsAndShoutouts,
            RichTextField::Csr,
            RichTextField::EmployeeEvents,
        ]
    }
}

/// Image fields. Each holds an empty string or a data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageField {
    Background,
    Leadership,
    Compliance,
    Csr1,
    Csr2,
    Events1,
    Events2,
}

impl ImageField {
    /// Aspect ratio (width / height) the crop dialog is constrained to.
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            ImageField::Background | ImageField::Compliance => 16.0 / 9.0,
            ImageField::Leadership => 1.0,
            ImageField::Csr1 | ImageField::Csr2 | ImageField::Events1 | ImageField::Events2 => {
                4.0 / 3.0
            }
        }
    }

    /// Alt text used when the image is exported.
    pub fn alt_text(&self) -> &'static str {
        match self {
            ImageField::Background => "",
            ImageField::Leadership => "CEO",
            ImageField::Compliance => "Compliance",
            ImageField::Csr1 => "CSR 1",
            ImageField::Csr2 => "CSR 2",
            ImageField::Events1 => "Event 1",
            ImageField::Events2 => "Event 2",
        }
    }

    pub fn all() -> &'static [ImageField] {
        &[
            ImageField::Background,
            ImageField::Leadership,
            ImageField::Compliance,
            ImageField::Csr1,
            ImageField::Csr2,
            ImageField::Events1,
            ImageField::Events2,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratios() {
        assert_eq!(ImageField::Leadership.aspect_ratio(), 1.0);
        assert_eq!(ImageField::Background.aspect_ratio(), 16.0 / 9.0);
        assert_eq!(ImageField::Csr2.aspect_ratio(), 4.0 / 3.0);
    }

    #[test]
    fn test_all_lists_are_complete() {
        assert_eq!(TextField::all().len(), 6);
        assert_eq!(RichTextField::all().len(), 9);
        assert_eq!(ImageField::all().len(), 7);
    }
}
