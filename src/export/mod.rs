//! Newsletter Export Module
//!
//! This module renders the content model to HTML and hands the result to
//! the clipboard.
//!
//! # Outputs
//!
//! - **Email HTML**: complete document with table layout and inline styles,
//!   safe to paste into a bulk-email composer
//! - **Preview HTML**: stylesheet-based page for on-screen preview
//!
//! # Architecture
//!
//! - `email.rs` - Email document generation
//! - `preview.rs` - Preview page generation
//! - `escape.rs` - Escaping and URL checks for plain-text values
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod email;
mod escape;
pub mod preview;

pub use clipboard::{copy_html_to_clipboard, ClipboardError, ClipboardSink, SystemClipboard};
pub use email::{render_email_html, render_email_html_with};
pub use escape::html_escape;
pub use preview::render_preview_html;
