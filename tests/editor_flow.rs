//! End-to-end editing session through the public API.

use newsletter_builder::crop::CropOffset;
use newsletter_builder::export::{ClipboardError, ClipboardSink};
use newsletter_builder::model::{ImageField, RichTextField, TextField};
use newsletter_builder::{FileStorage, NewsletterEditor, Settings};
use std::io::Cursor;
use tempfile::TempDir;

struct RecordingClipboard(Option<String>);

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0 = Some(text.to_string());
        Ok(())
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let raster = image::RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(raster)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

#[test]
fn test_edit_save_reopen_and_export() {
    let temp = TempDir::new().unwrap();
    let settings = Settings::default();

    let mut editor = NewsletterEditor::new(FileStorage::new(temp.path()), settings.clone());
    editor.set_text(TextField::IssueName, "Storm Week");
    editor.set_text(TextField::NewsletterName, "Port Pulse & Friends");
    editor.set_rich_text(
        RichTextField::SafetyReminders,
        "<p onclick=\"steal()\">Stay <strong>indoors</strong></p><script>alert(1)</script>",
    );
    editor.open_crop(ImageField::Csr1, png(80, 60));
    editor.apply_crop(CropOffset::new(10.0, 10.0), 2.0).unwrap();
    let saved = editor.save_issue().unwrap();

    // A fresh session on the same directory sees the saved issue.
    let mut reopened = NewsletterEditor::new(FileStorage::new(temp.path()), settings);
    assert_eq!(reopened.saved_issues().len(), 1);
    assert!(reopened.load_issue(&saved.id));
    assert_eq!(reopened.model().issue_name, "Storm Week");

    let html = reopened.generate_html().to_string();
    assert!(html.contains("Port Pulse &amp; Friends"));
    assert!(html.contains("<strong>indoors</strong>"));
    assert!(!html.contains("<script"));
    assert!(!html.contains("onclick"));
    assert!(html.contains("data:image/jpeg;base64,"));

    let mut clipboard = RecordingClipboard(None);
    reopened.copy_html(&mut clipboard).unwrap();
    assert_eq!(clipboard.0.as_deref(), Some(html.as_str()));

    assert!(reopened.preview_html().contains("<strong>indoors</strong>"));
}
