//! Newsletter Builder
//!
//! Builds a company newsletter from a form-style content model and exports it
//! as an email-safe HTML document.
//!
//! - [`sanitize`] filters untrusted rich-text fragments against an allow-list
//! - [`model`] holds every editable field of one issue
//! - [`export`] renders the email document and the on-screen preview, and
//!   copies the export to the clipboard
//! - [`crop`] crops and zooms uploaded images into JPEG data URLs
//! - [`store`] persists named issue snapshots in a storage slot
//! - [`editor`] ties the pieces into one editing session for a host UI

pub mod config;
pub mod crop;
pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod sanitize;
pub mod store;

pub use config::{load_config, save_config, Settings};
pub use editor::NewsletterEditor;
pub use error::{Error, Result, ResultExt};
pub use model::{ContentModel, SavedIssue};
pub use store::{FileStorage, IssueStore, MemoryStorage, StoragePort};

/// Initialize logging from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logging() {
    if env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .is_ok()
    {
        log::info!("Starting {}", config::APP_NAME);
    }
}
