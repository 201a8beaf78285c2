//! Clipboard Operations for HTML Export
//!
//! Copying the exported document is the last step of the workflow. The
//! system clipboard is reached through the arboard crate behind the
//! [`ClipboardSink`] trait, so hosts and tests can substitute their own.
//! A failed copy is reported, never retried.

#![allow(clippy::enum_variant_names)]

use arboard::Clipboard;
use log::{info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Message shown to the user when automatic copying fails.
pub const MANUAL_COPY_MESSAGE: &str = "Could not copy automatically. Please copy manually.";

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard (no display server, permission denied)
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl ClipboardError {
    /// Text to show the user for this failure.
    pub fn user_message(&self) -> &'static str {
        MANUAL_COPY_MESSAGE
    }
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => {
                write!(f, "Clipboard access error: {}. {}", msg, MANUAL_COPY_MESSAGE)
            }
            ClipboardError::WriteError(msg) => {
                write!(f, "Clipboard write error: {}. {}", msg, MANUAL_COPY_MESSAGE)
            }
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Sink
// ─────────────────────────────────────────────────────────────────────────────

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard, opened lazily on each copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Copy an exported HTML document as plain text.
///
/// Email composers expect the markup itself (pasted into an HTML source
/// box), so the document goes onto the clipboard as text.
pub fn copy_html_to_clipboard<C: ClipboardSink + ?Sized>(
    clipboard: &mut C,
    html: &str,
) -> Result<(), ClipboardError> {
    match clipboard.set_text(html) {
        Ok(()) => {
            info!("Copied {} bytes of HTML to the clipboard", html.len());
            Ok(())
        }
        Err(e) => {
            warn!("Clipboard copy failed: {}", e);
            Err(e)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
