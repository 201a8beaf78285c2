//! Newsletter Editor Controller
//!
//! `NewsletterEditor` is the state a host UI drives: the live content model,
//! the saved issue store, the single open crop request, the last generated
//! export and the issue selected in the load list. Every operation takes
//! `&mut self`; the host re-reads `preview_html()` after each change.

use crate::config::Settings;
use crate::crop::{crop_image, decode_data_url, read_image_file, CropOffset, CropRequest};
use crate::error::{Error, Result};
use crate::export::{copy_html_to_clipboard, render_email_html_with, render_preview_html};
use crate::export::{ClipboardError, ClipboardSink};
use crate::model::{
    BackgroundMode, ContentModel, ImageField, QuickLink, RichTextField, SavedIssue, TextField,
    QUICK_LINK_SLOTS,
};
use crate::store::{IssueStore, StoragePort};
use log::{debug, info, warn};
use std::path::Path;

/// Editing session for one newsletter.
pub struct NewsletterEditor<S: StoragePort> {
    settings: Settings,
    model: ContentModel,
    store: IssueStore<S>,
    crop: Option<CropRequest>,
    generated_html: Option<String>,
    selected_issue: Option<String>,
}

impl<S: StoragePort> NewsletterEditor<S> {
    /// Start a session on the sample issue, opening the store under the
    /// configured storage key.
    pub fn new(storage: S, settings: Settings) -> Self {
        let store = IssueStore::open(storage, settings.storage_key.clone());
        Self::with_store(store, settings)
    }

    /// Start a session on an already opened store.
    pub fn with_store(store: IssueStore<S>, settings: Settings) -> Self {
        Self {
            settings,
            model: ContentModel::sample(),
            store,
            crop: None,
            generated_html: None,
            selected_issue: None,
        }
    }

    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Field edits
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.model.set_text(field, value.into());
    }

    pub fn set_rich_text(&mut self, field: RichTextField, value: impl Into<String>) {
        self.model.set_rich_text(field, value.into());
    }

    pub fn set_image(&mut self, field: ImageField, value: impl Into<String>) {
        self.model.set_image(field, value.into());
    }

    /// Replace one of the three quick link slots.
    pub fn set_quick_link(
        &mut self,
        index: usize,
        label: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<()> {
        let slot = self.model.quick_links.get_mut(index).ok_or_else(|| {
            Error::Application(format!(
                "quick link slot {} out of range (0-{})",
                index,
                QUICK_LINK_SLOTS - 1
            ))
        })?;
        *slot = QuickLink::new(label, url);
        Ok(())
    }

    pub fn set_background_mode(&mut self, mode: BackgroundMode) {
        self.model.background_mode = mode;
    }

    /// Set the background opacity, clamped to the allowed range.
    pub fn set_background_opacity(&mut self, opacity: f64) {
        self.model.background_opacity = opacity;
        self.model.sanitize();
    }

    /// The preview page for the current model.
    pub fn preview_html(&self) -> String {
        render_preview_html(&self.model, &self.settings)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cropping
    // ─────────────────────────────────────────────────────────────────────────

    /// The open crop request, if any.
    pub fn crop_request(&self) -> Option<&CropRequest> {
        self.crop.as_ref()
    }

    /// Open the crop dialog for `field`. Replaces any request already open.
    pub fn open_crop(&mut self, field: ImageField, source: Vec<u8>) {
        if let Some(previous) = &self.crop {
            debug!("Replacing open crop request for {:?}", previous.target);
        }
        self.crop = Some(CropRequest::new(field, source));
    }

    /// Open the crop dialog on an image file.
    ///
    /// A file that is not a readable image never opens the dialog.
    pub fn open_crop_file(&mut self, field: ImageField, path: &Path) -> Result<()> {
        let source = read_image_file(path)?;
        self.open_crop(field, source);
        Ok(())
    }

    /// Open the crop dialog on the image already stored in `field`.
    pub fn recrop(&mut self, field: ImageField) -> Result<()> {
        let source = decode_data_url(self.model.image(field))?;
        self.open_crop(field, source);
        Ok(())
    }

    /// Crop the open request's image and store it in the target field.
    ///
    /// The request is closed whether or not the crop succeeds; on failure the
    /// field keeps its previous value.
    pub fn apply_crop(&mut self, offset: CropOffset, zoom: f64) -> Result<()> {
        let request = self
            .crop
            .take()
            .ok_or_else(|| Error::Application("no crop in progress".to_string()))?;

        let cropped = crop_image(
            &request.source,
            offset,
            zoom,
            request.aspect_ratio,
            self.settings.crop.jpeg_quality,
        )
        .map_err(|e| {
            warn!("Crop for {:?} failed, keeping previous image: {}", request.target, e);
            e
        })?;

        info!(
            "Cropped {:?} to {}x{}",
            request.target, cropped.width, cropped.height
        );
        self.model.set_image(request.target, cropped.to_data_url());
        Ok(())
    }

    /// Close the crop dialog without touching the field.
    pub fn cancel_crop(&mut self) {
        self.crop = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Saved issues
    // ─────────────────────────────────────────────────────────────────────────

    /// Save a snapshot of the current model and select it.
    pub fn save_issue(&mut self) -> Result<SavedIssue> {
        let saved = self.store.save(&self.model)?;
        self.selected_issue = Some(saved.id.clone());
        Ok(saved)
    }

    /// Select `id` and load its snapshot into the live model.
    ///
    /// An unknown id still becomes the selection but leaves the model as it
    /// is. Returns whether a snapshot was loaded.
    pub fn load_issue(&mut self, id: &str) -> bool {
        self.selected_issue = Some(id.to_string());
        match self.store.load(id) {
            Some(model) => {
                info!("Loaded issue {}", id);
                self.model = model;
                true
            }
            None => false,
        }
    }

    pub fn saved_issues(&self) -> &[SavedIssue] {
        self.store.issues()
    }

    pub fn selected_issue(&self) -> Option<&str> {
        self.selected_issue.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the email document and keep it as the current export.
    pub fn generate_html(&mut self) -> &str {
        let html = render_email_html_with(&self.model, &self.settings.branding);
        debug!("Generated {} bytes of email HTML", html.len());
        self.generated_html.insert(html).as_str()
    }

    /// The last generated export, if any.
    pub fn generated_html(&self) -> Option<&str> {
        self.generated_html.as_deref()
    }

    /// Copy the current export to `sink`, generating it first if needed.
    pub fn copy_html<C: ClipboardSink + ?Sized>(
        &mut self,
        sink: &mut C,
    ) -> std::result::Result<(), ClipboardError> {
        if self.generated_html.is_none() {
            self.generate_html();
        }
        let html = self.generated_html.as_deref().unwrap_or_default();
        copy_html_to_clipboard(sink, html)
    }
}
