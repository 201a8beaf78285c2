//! Sample issue the editor starts with.

use super::{BackgroundMode, ContentModel, QuickLink, DEFAULT_BACKGROUND_OPACITY};

pub(super) fn sample_content() -> ContentModel {
    ContentModel {
        newsletter_name: "Port Pulse".into(),
        edition: "December 2025".into(),
        issue_title: "Storm Safety & Xmas Edition".into(),
        issue_name: "Dec 2025 - Storm & Xmas".into(),
        logo_url: String::new(),
        leadership_title:
            "Standing Strong Together Through Storms, Challenges, and Celebrations".into(),
        leadership_body_html: r#"
<p>Many families and communities are affected by the ongoing storms and flooding. Your safety and well-being come before everything else.</p>
<p>Please prioritise your health, your family and your home over work obligations. If you are affected in any way, speak to your supervisor or HR immediately.</p>
<p>On behalf of the entire leadership team, thank you for the heart you bring to this company.</p>
"#
        .into(),
        important_announcements_html: r#"
<ul>
  <li><strong>New Optional Courses on CALM:</strong> <em>Airport Arrival Guide</em> and <em>EPF/ETF Process Guide</em> are now available.</li>
  <li><strong>Attendance in December:</strong> Grace periods and flexible reporting are in place. Please coordinate with your supervisors.</li>
  <li><strong>Transport Support:</strong> If your route is affected by flooding, HR will assist with arrangements where possible.</li>
</ul>
"#
        .into(),
        compliance_reminders_html: r#"
<ul>
  <li><strong>Do not purchase, possess, smoke, or distribute vapes or foreign cigarettes.</strong></li>
  <li><strong>Do not import vapes, e-cigarette liquids, or foreign tobacco products.</strong> Personal use is not permitted either.</li>
  <li>When unsure, ask Compliance before bringing any item into the country.</li>
</ul>
"#
        .into(),
        safety_reminders_html: r#"
<ul>
  <li>Avoid all non-essential travel during red or amber warnings.</li>
  <li>Never walk or drive through flooded streets.</li>
  <li>Keep devices charged and store important documents in waterproof bags.</li>
  <li>Report your safety status to your team lead daily during severe weather.</li>
</ul>
"#
        .into(),
        special_message_html: r#"
<p>The end of the year is a time of reflection, gratitude, and togetherness.</p>
<p>Wishing you joy, peace, and meaningful moments this Christmas.</p>
"#
        .into(),
        useful_info_html: r#"
<p><strong>Port City BPO (Pvt) Ltd.</strong><br/>
Level 6, Lotus Tower Commercial Wing,<br/>
Colombo, Sri Lanka</p>
<p><strong>Key Contacts</strong><br/>
HR &amp; Admin: 077 xxx xxxx<br/>
Security &amp; Compliance Hotline: 011 xxx xxxx</p>
"#
        .into(),
        wins_and_shoutouts_html: r#"
<ul>
  <li>The <strong>Training Team</strong> onboarded 47 new staff members in November.</li>
  <li><strong>Compliance Team</strong> cleared a backlog of 163 cases with 100% accuracy.</li>
  <li>Kudos to the <strong>Night Shift Ops Team</strong> for covering travel-blocked shifts.</li>
</ul>
"#
        .into(),
        csr_html: r#"
<h4>Flood Relief Support - Gampaha District</h4>
<p>Volunteers delivered emergency packs with dry rations, medicine, and hygiene supplies to 42 affected families.</p>
<h4>School Supplies Donation - Polonnaruwa</h4>
<p>We contributed stationery packs to 120 students in rural schools.</p>
"#
        .into(),
        employee_events_html: r#"
<h4>Office Xmas Deco Day</h4>
<p>Teams decorated their pods with Christmas themes. Congratulations to Team Phoenix for winning first place!</p>
<h4>November Fun Challenge - Step Count Edition</h4>
<p>Over 160 employees clocked more than 4.2 million steps in 30 days.</p>
"#
        .into(),
        quick_links: [
            QuickLink::new("CALM Portal", "https://calm.example.com"),
            QuickLink::new("HR Support Desk", "https://forms.office.com/xxxx"),
            QuickLink::new("Emergency SOP", "https://intranet/portcity/emergency"),
        ],
        background_mode: BackgroundMode::Cover,
        background_opacity: DEFAULT_BACKGROUND_OPACITY,
        ..ContentModel::default()
    }
}
